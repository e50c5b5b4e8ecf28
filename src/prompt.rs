use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use regmirror::store::{check_url, RegistryStore};

/// Asks the user to pick one of `items`. `None` means the selection was cancelled.
pub fn select(prompt: &str, items: &[String]) -> Result<Option<String>> {
    let theme = ColorfulTheme::default();
    let index = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?;
    Ok(index.map(|i| items[i].clone()))
}

/// Reads a mirror name that is neither built-in nor already taken.
pub fn new_name(store: &RegistryStore, prompt: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    let name = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            store.check_new_name(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Reads a non-blank URL, optionally pre-filled with `initial`.
pub fn url(prompt: &str, initial: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            check_url(input).map(|_| ()).map_err(|e| e.to_string())
        });
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    let url = input.interact_text()?;
    Ok(url.trim().to_string())
}
