// apps/catalog_admin/src/demo.rs

//! Sample products for the in-memory store.

use catalog::ProductFields;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn products() -> Vec<ProductFields> {
  let now = Utc::now();
  vec![
    ProductFields {
      name: "Trail Running Shoe".to_string(),
      description: "Lightweight shoe with a grippy outsole for rocky trails.".to_string(),
      price: Decimal::new(12000, 2),
      sale_price: Some(Decimal::new(9900, 2)),
      stock: 14,
      category: "Footwear".to_string(),
      images: vec!["https://images.example.com/trail-shoe-side.jpg".to_string()],
      specifications: BTreeMap::from([
        ("drop".to_string(), "6mm".to_string()),
        ("weight".to_string(), "280g".to_string()),
      ]),
      updated_at: now,
    },
    ProductFields {
      name: "Packable Rain Jacket".to_string(),
      description: "Seam-sealed shell that folds into its own pocket.".to_string(),
      price: Decimal::new(8900, 2),
      sale_price: None,
      stock: 6,
      category: "Outerwear".to_string(),
      images: Vec::new(),
      specifications: BTreeMap::from([("waterproofing".to_string(), "20k mm".to_string())]),
      updated_at: now,
    },
    ProductFields {
      name: "Enamel Camp Mug".to_string(),
      description: "350ml steel mug with a chip-resistant enamel coat.".to_string(),
      price: Decimal::new(1450, 2),
      sale_price: None,
      stock: 0,
      category: "general".to_string(),
      images: vec![
        "https://images.example.com/camp-mug-blue.jpg".to_string(),
        "https://images.example.com/camp-mug-red.jpg".to_string(),
      ],
      specifications: BTreeMap::new(),
      updated_at: now,
    },
  ]
}
