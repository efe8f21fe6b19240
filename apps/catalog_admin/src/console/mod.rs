// apps/catalog_admin/src/console/mod.rs

//! Interactive admin console: the product list and the product form.

pub mod commands;
pub mod render;

use crate::errors::Result;
use crate::state::AppState;
use catalog::{DeleteOutcome, Product, ProductEditor, SubmitOutcome};
use commands::{BrowserCommand, EditorCommand};
use std::io::{self, BufRead, Write};
use tracing::{info, instrument, warn};

enum Flow {
  Continue,
  Quit,
}

/// Reads one line after printing `prompt`. `None` on end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
  print!("{}", prompt);
  io::stdout().flush()?;
  let mut line = String::new();
  if io::stdin().lock().read_line(&mut line)? == 0 {
    return Ok(None);
  }
  Ok(Some(line))
}

pub async fn run(state: &AppState) -> Result<()> {
  match &state.config.api_url {
    Some(url) => println!("Product catalog admin: {} (table '{}')", url, state.config.table),
    None => println!("Product catalog admin: in-memory store"),
  }
  println!("Type `help` for commands.\n");

  if let Err(e) = state.browser.load_all().await {
    println!("Could not load products: {}", e);
  }
  let mut query = String::new();
  println!("{}", render::view(&state.browser.view(&query), &query));

  while let Some(line) = read_line("catalog> ")? {
    let command = match commands::parse_browser(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(e) => {
        println!("{}", e);
        continue;
      }
    };
    match handle_browser_command(state, &mut query, command).await {
      Ok(Flow::Continue) => {}
      Ok(Flow::Quit) => break,
      Err(e) => println!("{}", e),
    }
  }
  info!("Console session ended.");
  Ok(())
}

async fn handle_browser_command(state: &AppState, query: &mut String, command: BrowserCommand) -> Result<Flow> {
  let browser = &state.browser;
  match command {
    BrowserCommand::List => {}
    BrowserCommand::Search(text) => *query = text,
    BrowserCommand::Reload => {
      browser.load_all().await?;
    }
    BrowserCommand::Add => {
      edit_session(state, None).await?;
    }
    BrowserCommand::Edit(selector) => {
      let product = commands::resolve_selector(&browser.filter(query), &selector)?;
      edit_session(state, Some(&product)).await?;
    }
    BrowserCommand::Delete(selector) => {
      let product = commands::resolve_selector(&browser.filter(query), &selector)?;
      // A failed delete has already been reported through the prompt.
      match browser.delete(product.id).await {
        Ok(DeleteOutcome::Deleted) => println!("Deleted '{}'.", product.name),
        Ok(DeleteOutcome::Cancelled) => println!("Kept '{}'.", product.name),
        Err(e) => warn!(error = %e, "Delete did not complete."),
      }
    }
    BrowserCommand::Help => {
      println!("{}", render::BROWSER_HELP);
      return Ok(Flow::Continue);
    }
    BrowserCommand::Quit => return Ok(Flow::Quit),
  }
  println!("{}", render::view(&browser.view(query), query));
  Ok(Flow::Continue)
}

/// Runs the product form until it is saved or cancelled. A successful save
/// reloads the product list.
#[instrument(name = "console::edit_session", skip_all, fields(editing = product.is_some()))]
async fn edit_session(state: &AppState, product: Option<&Product>) -> Result<()> {
  let editor = ProductEditor::open(product, state.store.clone(), state.prompt.clone());
  println!("{}", render::form(editor.title(), &editor.form()));
  println!("Type `help` for form commands.");

  while let Some(line) = read_line("form> ")? {
    let command = match commands::parse_editor(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(e) => {
        println!("{}", e);
        continue;
      }
    };

    match command {
      EditorCommand::Name(v) => editor.set_name(v),
      EditorCommand::Description(v) => editor.set_description(v),
      EditorCommand::Category(v) => editor.set_category(v),
      EditorCommand::Price(v) => editor.set_price(v),
      EditorCommand::SalePrice(v) => editor.set_sale_price(v),
      EditorCommand::Stock(v) => editor.set_stock(v),
      EditorCommand::AddImage(url) => {
        if !editor.add_image(&url) {
          println!("Ignored: image URL is empty.");
        }
      }
      EditorCommand::RemoveImage(index) => {
        if editor.remove_image(index).is_none() {
          println!("No image at position {}.", index + 1);
        }
      }
      EditorCommand::SetSpecification { key, value } => {
        if !editor.add_specification(&key, &value) {
          println!("Ignored: specification key and value must both be non-empty.");
        }
      }
      EditorCommand::RemoveSpecification(key) => {
        if editor.remove_specification(&key).is_none() {
          println!("No specification named '{}'.", key.trim());
        }
      }
      EditorCommand::Show => println!("{}", render::form(editor.title(), &editor.form())),
      EditorCommand::Help => println!("{}", render::EDITOR_HELP),
      EditorCommand::Cancel => {
        println!("Discarded changes.");
        return Ok(());
      }
      EditorCommand::Save => {
        // Failures were already reported through the prompt; the form stays as is.
        let Ok(outcome) = editor.submit().await else {
          continue;
        };
        match outcome {
          SubmitOutcome::Created => println!("Product created."),
          SubmitOutcome::Updated { .. } => println!("Product updated."),
        }
        if let Err(e) = state.browser.load_all().await {
          println!("Saved, but reloading the list failed: {}", e);
        }
        return Ok(());
      }
    }
  }
  Ok(())
}
