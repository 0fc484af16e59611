//! Extracts ingredient trees from the food infoboxes of MediaWiki pages.
//!
//! ```
//! use dessert::{Extractor, Forest};
//!
//! let page = "{{Infobox food\n| main_ingredient = [[Rice]], [[milk]] ([[cow]] or [[buffalo]])\n}}";
//! let ingredients = Extractor::default().extract(page);
//! assert_eq!(Forest(&ingredients).to_string(), "Rice, milk (cow, buffalo)");
//! ```

pub mod config;
pub mod extract;
pub mod ingredient;
pub mod report;
pub mod wikitext;

pub use config::Configuration;
pub use extract::Extractor;
pub use ingredient::{Forest, Ingredient};
