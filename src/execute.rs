use anyhow::Result;
use colored::Colorize;
use regmirror::commands::{self, Active};
use regmirror::config::Config;
use regmirror::error::MirrorError;
use regmirror::manager::NpmCli;
use regmirror::probe::HttpProbe;
use regmirror::store::{Action, RegistryStore};
use crate::cli::{MirrorCommand, CLI};
use crate::prompt;

pub fn execute(cli: CLI, config: &Config) -> Result<()> {
    let mut store = RegistryStore::load(&config.registries_file)?;
    let npm = NpmCli::new(&config.npm_program);
    let outcome = match cli.command {
        MirrorCommand::List => {
            execute_list(&store, &npm)
        }
        MirrorCommand::Use { name } => {
            execute_use(&store, &npm, name)
        }
        MirrorCommand::Current => {
            execute_current(&store, &npm)
        }
        MirrorCommand::Ping { name } => {
            execute_ping(&store, config, name)
        }
        MirrorCommand::Add => {
            execute_add(&mut store)
        }
        MirrorCommand::Delete => {
            execute_delete(&mut store, &npm)
        }
        MirrorCommand::Rename => {
            execute_rename(&mut store)
        }
        MirrorCommand::Edit => {
            execute_edit(&mut store)
        }
    };
    report(outcome)
}

/// Mirror errors end the command with a message; anything else (a broken terminal,
/// for instance) is passed up.
fn report(outcome: Result<()>) -> Result<()> {
    match outcome {
        Err(e) => match e.downcast_ref::<MirrorError>() {
            Some(err) => {
                println!("{}", err.to_string().red());
                Ok(())
            }
            None => Err(e),
        },
        ok => ok,
    }
}

/// Resolves the mirror name from the command line, or asks for one.
fn pick(store: &RegistryStore, name: Option<String>, prompt_text: &str) -> Result<Option<String>> {
    match name {
        Some(name) => Ok(Some(name)),
        None => prompt::select(prompt_text, &store.names()),
    }
}

pub fn execute_list(store: &RegistryStore, npm: &NpmCli) -> Result<()> {
    let (listing, query_error) = commands::list(store, npm);
    let lines = commands::format_listing(&listing);
    for (mirror, line) in listing.entries.iter().zip(lines) {
        if listing.is_active(&mirror.name) {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
    if let Some(err) = query_error {
        println!("{}", format!("Could not determine the registry in use: {}", err).red());
    }
    Ok(())
}

pub fn execute_use(store: &RegistryStore, npm: &NpmCli, name: Option<String>) -> Result<()> {
    let Some(name) = pick(store, name, "Select a mirror")? else {
        return Ok(());
    };
    let mirror = commands::use_mirror(store, npm, &name)?;
    println!("{}", format!("Switched to {} ({})", mirror.name, mirror.registry).green());
    Ok(())
}

pub fn execute_current(store: &RegistryStore, npm: &NpmCli) -> Result<()> {
    match commands::current(store, npm)? {
        Active::Known(mirror) => {
            println!("{}", format!("Current registry: {}", mirror.name).blue());
        }
        Active::Unknown(url) => {
            println!("{}", format!("Current registry: {} (not a known mirror)", url).blue());
        }
    }
    Ok(())
}

pub fn execute_ping(store: &RegistryStore, config: &Config, name: Option<String>) -> Result<()> {
    let Some(name) = pick(store, name, "Select a mirror to ping")? else {
        return Ok(());
    };
    let probe = HttpProbe::new(config.ping_timeout)?;
    let elapsed = commands::ping(store, &probe, &name)?;
    println!("{}", format!("Response time: {}ms", elapsed.as_millis()).blue());
    Ok(())
}

pub fn execute_add(store: &mut RegistryStore) -> Result<()> {
    let name = prompt::new_name(store, "Mirror name")?;
    let url = prompt::url("Mirror URL", None)?;
    let mirror = commands::add(store, &name, &url)?;
    println!("{}", format!("Added {} ({})", mirror.name, mirror.registry).blue());
    Ok(())
}

pub fn execute_delete(store: &mut RegistryStore, npm: &NpmCli) -> Result<()> {
    let names = store.editable_for(Action::Delete)?;
    let Some(name) = prompt::select("Select a mirror to delete", &names)? else {
        return Ok(());
    };
    let mirror = commands::delete(store, npm, &name)?;
    println!("{}", format!("Deleted {}", mirror.name).blue());
    Ok(())
}

pub fn execute_rename(store: &mut RegistryStore) -> Result<()> {
    let names = store.editable_for(Action::Rename)?;
    let Some(old_name) = prompt::select("Select a mirror to rename", &names)? else {
        return Ok(());
    };
    let new_name = prompt::new_name(store, "New name")?;
    let mirror = commands::rename(store, &old_name, &new_name)?;
    println!("{}", format!("Renamed {} to {}", old_name, mirror.name).blue());
    Ok(())
}

pub fn execute_edit(store: &mut RegistryStore) -> Result<()> {
    let names = store.editable_for(Action::Edit)?;
    let Some(name) = prompt::select("Select a mirror to edit", &names)? else {
        return Ok(());
    };
    let initial = store.get(&name).map(|m| m.registry.clone());
    let url = prompt::url("New URL", initial.as_deref())?;
    let mirror = commands::edit(store, &name, &url)?;
    println!("{}", format!("Updated {} ({})", mirror.name, mirror.registry).blue());
    Ok(())
}
