use scraper::{ElementRef, Html, Selector};

use crate::record::{Label, ProductRecord};
use crate::{Error, Result, EXPECTED_PRODUCTS_PER_PAGE};

// Single-class markers match any element carrying that class. Markers with a space match the
// whole class attribute, the way they appear in markup.
const CONTAINER: &str = r#"div[class="DOjaWF gdgoEp"]"#;
/// The site uses a different block for grid, list and compact layouts.
const PRODUCT_BLOCKS: &[&str] = &["div.tUxRFH", "div.slAVV4", r#"div[class="_1sdMkc LFEi7Z"]"#];
const NAME: &[&str] = &["div.KzDlHZ", "a.wjcEIp, a.WKTcLC"];
const PRICE: &[&str] = &["div.Nx9bqj"];
const DISCOUNT: &[&str] = &["div.UkUFwK"];
const RATING: &[&str] = &["div.XQDdHH"];

/// Turns a results page into product records.
/// Selectors are compiled once and reused for every page.
#[derive(Debug)]
pub struct Extractor {
    container: Selector,
    product: Selector,
    name: Vec<Selector>,
    price: Vec<Selector>,
    discount: Vec<Selector>,
    rating: Vec<Selector>,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: create_selector(CONTAINER)?,
            product: create_selector(&PRODUCT_BLOCKS.join(", "))?,
            name: create_selectors(NAME)?,
            price: create_selectors(PRICE)?,
            discount: create_selectors(DISCOUNT)?,
            rating: create_selectors(RATING)?,
        })
    }

    /// Extracts every product block in the listing container, in document order.
    /// Missing container means an empty page. Missing or malformed fields degrade per field
    /// and never stop the rest of the block or the page.
    pub fn extract(&self, html: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(html);

        let Some(container) = doc.select(&self.container).next() else {
            return Vec::new();
        };

        let mut records = Vec::with_capacity(EXPECTED_PRODUCTS_PER_PAGE);
        for product in container.select(&self.product) {
            records.push(self.extract_product(product));
        }
        records
    }

    fn extract_product(&self, product: ElementRef) -> ProductRecord {
        let name = first_text(product, &self.name)
            .map(Label::Text)
            .unwrap_or(Label::NotAvailable);
        let price = first_text(product, &self.price).and_then(|text| parse_price(&text));
        let discount = first_text(product, &self.discount)
            .map(|text| Label::Text(strip_discount(&text)))
            .unwrap_or(Label::NotAvailable);
        let rating = first_text(product, &self.rating).and_then(|text| parse_rating(&text));

        ProductRecord {
            name,
            price,
            discount,
            rating,
        }
    }
}

/// Tries the candidates in order and returns the trimmed text of the first element found.
fn first_text(scope: ElementRef, candidates: &[Selector]) -> Option<String> {
    candidates
        .iter()
        .find_map(|sel| scope.select(sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// `"₹1,299"` -> `1299.0`. Anything that isn't a finite number after cleanup is `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(['₹', ','], "");
    parse_number(&cleaned)
}

pub fn parse_rating(text: &str) -> Option<f64> {
    parse_number(text)
}

/// `"50% off"` -> `"50%"`.
pub fn strip_discount(text: &str) -> String {
    text.trim().replace("off", "").trim().to_string()
}

#[inline]
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}

fn create_selectors(sel_strs: &[&str]) -> Result<Vec<Selector>> {
    sel_strs.iter().map(|s| create_selector(s)).collect()
}
