//! Field normalizations applied right before a record is stored

use crate::models::{Product, TicketsAvailability, TourGroup};

/// A record that derives some of its fields when it is saved
pub trait PreSave {
    fn pre_save(&mut self);
}

impl PreSave for Product {
    /// Derive `slug` from the platform product name
    fn pre_save(&mut self) {
        match &self.platform_product_name {
            Some(name) if !name.trim().is_empty() => self.slug = Some(kebab_case(name)),
            _ => {}
        }
    }
}

impl PreSave for TourGroup {
    /// Mirror `product_id` into the legacy `product` field when it is unset
    fn pre_save(&mut self) {
        if !self.product_id.is_empty() && self.product.is_empty() {
            self.product = self.product_id.clone();
        }
    }
}

impl PreSave for TicketsAvailability {
    fn pre_save(&mut self) {
        self.id = format!("{}{}", self.place, self.placedate);
    }
}

/// Lowercase words joined by `-`
///
/// Words break on any non-alphanumeric character, on a lower-to-upper case
/// change, before the last capital of an acronym followed by lowercase
/// (`HTMLPage` -> `html-page`) and between letters and digits. Apostrophes
/// are dropped rather than treated as separators.
pub fn kebab_case(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')).collect();

    let mut words = Vec::new();
    for chunk in cleaned.split(|c: char| !c.is_alphanumeric()) {
        split_words(chunk, &mut words);
    }
    words.join("-")
}

fn split_words(chunk: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower)
                || (prev.is_alphabetic() != c.is_alphabetic());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
}
