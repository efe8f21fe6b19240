// apps/catalog_admin/src/console/render.rs

//! Plain-text rendering of the catalog list and the product form.

use catalog::{CatalogView, Product, ProductForm};
use std::fmt::Write;

const DESCRIPTION_PREVIEW_CHARS: usize = 80;

pub const BROWSER_HELP: &str = "\
Commands:
  list                 show products (filtered by the current search)
  search <text>        filter by name or category; `clear` resets
  reload               fetch products from the store again
  add                  create a product
  edit <n|id>          edit the product at position n, or by id prefix
  delete <n|id>        delete a product (asks for confirmation)
  quit";

pub const EDITOR_HELP: &str = "\
Form commands:
  name|description|category <text>
  price <amount>       regular price
  sale <amount>        sale price; blank or 0 removes the sale
  stock <count>
  image add <url>      image rm <n>
  spec <key>=<value>   spec rm <key>
  show                 print the form
  save                 submit to the store
  cancel               discard and go back";

pub fn view(view: &CatalogView, query: &str) -> String {
  match view {
    CatalogView::Loading => "Loading products...".to_string(),
    CatalogView::EmptyNoQuery => "No products yet. Get started by adding your first product with `add`.".to_string(),
    CatalogView::EmptyWithQuery => format!("No products found for '{}'. Try adjusting your search query.", query),
    CatalogView::Populated(products) => {
      let mut out = String::new();
      if !query.is_empty() {
        let _ = writeln!(out, "Search: '{}' ({} match{})", query, products.len(), if products.len() == 1 { "" } else { "es" });
      }
      for (i, product) in products.iter().enumerate() {
        out.push_str(&card(i + 1, product));
      }
      out.trim_end().to_string()
    }
  }
}

pub fn card(position: usize, product: &Product) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{:>3}. {}  [{}]", position, product.name, product.category);

  let price = if product.is_on_sale() {
    format!("${} (was ${})", product.display_price(), product.price)
  } else {
    format!("${}", product.display_price())
  };
  let _ = writeln!(out, "     {}  Stock: {}  id: {}", price, product.stock, short_id(product));
  let _ = writeln!(out, "     {}", preview(&product.description));
  if let Some(url) = product.thumbnail() {
    let _ = writeln!(out, "     image: {}", url);
  }
  out
}

pub fn form(title: &str, form: &ProductForm) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "== {} ==", title);
  let _ = writeln!(out, "  name:        {}", form.name);
  let _ = writeln!(out, "  description: {}", form.description);
  let _ = writeln!(out, "  category:    {}", form.category);
  let _ = writeln!(out, "  price:       {}", form.price);
  let _ = writeln!(out, "  sale price:  {}", form.sale_price);
  let _ = writeln!(out, "  stock:       {}", form.stock);

  if form.images.is_empty() {
    let _ = writeln!(out, "  images:      (none)");
  } else {
    let _ = writeln!(out, "  images:");
    for (i, url) in form.images.iter().enumerate() {
      let _ = writeln!(out, "    {}. {}", i + 1, url);
    }
  }

  if form.specifications.is_empty() {
    let _ = writeln!(out, "  specifications: (none)");
  } else {
    let _ = writeln!(out, "  specifications:");
    for (key, value) in &form.specifications {
      let _ = writeln!(out, "    {}: {}", key, value);
    }
  }
  out.trim_end().to_string()
}

fn short_id(product: &Product) -> String {
  product.id.to_string().chars().take(8).collect()
}

fn preview(text: &str) -> String {
  if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
    return text.to_string();
  }
  let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
  format!("{}...", cut.trim_end())
}
