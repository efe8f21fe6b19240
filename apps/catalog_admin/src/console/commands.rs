// apps/catalog_admin/src/console/commands.rs

//! Parsing of console input lines into commands.

use crate::errors::{AppError, Result};
use catalog::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
  /// Re-render the list with the current search query.
  List,
  /// Set the search query; an empty query clears it.
  Search(String),
  Reload,
  Add,
  Edit(String),
  Delete(String),
  Help,
  Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
  Name(String),
  Description(String),
  Category(String),
  Price(String),
  SalePrice(String),
  Stock(String),
  AddImage(String),
  /// Zero-based position.
  RemoveImage(usize),
  SetSpecification { key: String, value: String },
  RemoveSpecification(String),
  Show,
  Save,
  Cancel,
  Help,
}

fn split_command(line: &str) -> Option<(String, &str)> {
  let line = line.trim();
  if line.is_empty() {
    return None;
  }
  let (word, rest) = match line.split_once(char::is_whitespace) {
    Some((word, rest)) => (word, rest.trim()),
    None => (line, ""),
  };
  Some((word.to_lowercase(), rest))
}

fn require_arg(arg: &str, usage: &'static str) -> Result<String> {
  if arg.is_empty() {
    return Err(AppError::Usage(usage));
  }
  Ok(arg.to_string())
}

pub fn parse_browser(line: &str) -> Result<Option<BrowserCommand>> {
  let Some((word, arg)) = split_command(line) else {
    return Ok(None);
  };
  let command = match word.as_str() {
    "list" | "ls" => BrowserCommand::List,
    "search" | "find" | "/" => BrowserCommand::Search(arg.to_string()),
    "clear" => BrowserCommand::Search(String::new()),
    "reload" | "refresh" => BrowserCommand::Reload,
    "add" | "new" => BrowserCommand::Add,
    "edit" => BrowserCommand::Edit(require_arg(arg, "usage: edit <number|id>")?),
    "delete" | "rm" => BrowserCommand::Delete(require_arg(arg, "usage: delete <number|id>")?),
    "help" | "?" => BrowserCommand::Help,
    "quit" | "exit" | "q" => BrowserCommand::Quit,
    _ => return Err(AppError::UnknownCommand(word)),
  };
  Ok(Some(command))
}

pub fn parse_editor(line: &str) -> Result<Option<EditorCommand>> {
  let Some((word, arg)) = split_command(line) else {
    return Ok(None);
  };
  let command = match word.as_str() {
    "name" => EditorCommand::Name(arg.to_string()),
    "description" | "desc" => EditorCommand::Description(arg.to_string()),
    "category" | "cat" => EditorCommand::Category(arg.to_string()),
    "price" => EditorCommand::Price(arg.to_string()),
    "sale" | "sale_price" => EditorCommand::SalePrice(arg.to_string()),
    "stock" => EditorCommand::Stock(arg.to_string()),
    "image" | "img" => parse_image(arg)?,
    "spec" | "specification" => parse_specification(arg)?,
    "show" => EditorCommand::Show,
    "save" => EditorCommand::Save,
    "cancel" | "back" => EditorCommand::Cancel,
    "help" | "?" => EditorCommand::Help,
    _ => return Err(AppError::UnknownCommand(word)),
  };
  Ok(Some(command))
}

const IMAGE_USAGE: &str = "usage: image add <url> | image rm <number>";
const SPECIFICATION_USAGE: &str = "usage: spec <key>=<value> | spec rm <key>";

fn parse_image(arg: &str) -> Result<EditorCommand> {
  let (action, rest) = split_command(arg).ok_or(AppError::Usage(IMAGE_USAGE))?;
  match action.as_str() {
    "add" => Ok(EditorCommand::AddImage(rest.to_string())),
    "rm" | "remove" => {
      let position = rest.parse::<usize>().map_err(|_| AppError::Usage(IMAGE_USAGE))?;
      position
        .checked_sub(1)
        .map(EditorCommand::RemoveImage)
        .ok_or(AppError::Usage(IMAGE_USAGE))
    }
    _ => Err(AppError::Usage(IMAGE_USAGE)),
  }
}

fn parse_specification(arg: &str) -> Result<EditorCommand> {
  if let Some((action, rest)) = split_command(arg) {
    if action == "rm" || action == "remove" {
      return Ok(EditorCommand::RemoveSpecification(require_arg(rest, SPECIFICATION_USAGE)?));
    }
  }
  match arg.split_once('=') {
    Some((key, value)) => Ok(EditorCommand::SetSpecification {
      key: key.to_string(),
      value: value.to_string(),
    }),
    None => Err(AppError::Usage(SPECIFICATION_USAGE)),
  }
}

/// Resolves a 1-based position in `shown` or a full/prefix product id.
pub fn resolve_selector(shown: &[Product], selector: &str) -> Result<Product> {
  let selector = selector.trim();
  if let Ok(position) = selector.parse::<usize>() {
    if let Some(product) = position.checked_sub(1).and_then(|i| shown.get(i)) {
      return Ok(product.clone());
    }
  }

  let needle = selector.to_lowercase();
  let mut matches = shown.iter().filter(|p| p.id.to_string().starts_with(&needle));
  match (matches.next(), matches.next()) {
    (Some(product), None) if needle.len() >= 4 => Ok(product.clone()),
    _ => Err(AppError::NoSuchProduct(selector.to_string())),
  }
}
