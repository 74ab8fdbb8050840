use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use phonebook_api::config::{PhonebookConfig, StorageBackend, StorageConfig};
use phonebook_api::helpers::storage::open_storage;
use phonebook_api::{ContactStore, ContactStoreError};
use shared_types::ContactsResponse;

#[derive(Parser, Debug)]
#[command(name = "contacts", about = "Manage the phonebook from the terminal")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Keep contacts in memory only (starts from the sample list)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print contacts, newest first
    List {
        /// Only show contacts whose name contains this text (any case)
        #[arg(long, default_value = "")]
        filter: String,

        /// Print JSON instead of one line per contact
        #[arg(long)]
        json: bool,
    },
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        number: String,
    },
    /// Remove a contact by id
    Remove { id: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PhonebookConfig::load_from(path),
        None => PhonebookConfig::load().map(|(config, _)| config),
    }
    .context("Failed to load phonebook config")?;

    let mut store = ContactStore::open(open_storage(&storage_config(&cli, &config))?)?;

    let code = run(
        cli.command,
        &mut store,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

fn storage_config(cli: &Cli, config: &PhonebookConfig) -> StorageConfig {
    let mut storage_config = config.storage();
    if cli.ephemeral {
        storage_config.backend = StorageBackend::Memory;
    }
    storage_config
}

/// Runs one command against the store and returns the process exit code.
fn run(
    command: Command,
    store: &mut ContactStore,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<i32> {
    match command {
        Command::List { filter, json } => {
            store.set_filter(&filter);
            let contacts = store.visible_contacts();

            if json {
                let response = ContactsResponse { contacts, filter };
                writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
            } else {
                for contact in contacts {
                    writeln!(out, "{}  {}: {}", contact.id, contact.name, contact.number)?;
                }
            }
        }
        Command::Add { name, number } => match store.add_contact(&name, &number) {
            Ok(contact) => writeln!(out, "Added {} ({})", contact.name, contact.id)?,
            Err(ContactStoreError::Duplicate(dup)) => {
                writeln!(err, "{}", dup)?;
                return Ok(1);
            }
            Err(e) => return Err(e.into()),
        },
        Command::Remove { id } => {
            store.remove_contact(&id)?;
            writeln!(out, "Removed {}", id)?;
        }
    }

    Ok(0)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook_api::storage::MemoryStorage;
    use shared_types::Contact;

    fn memory_store() -> ContactStore {
        ContactStore::open(Box::new(MemoryStorage::new())).unwrap()
    }

    fn run_args(args: &[&str], store: &mut ContactStore) -> (i32, String, String) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(cli.command, store, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_add_prepends() {
        let mut store = memory_store();

        let (code, out, err) = run_args(
            &["contacts", "add", "--name", "Jacob Mercer", "--number", "555-00-11"],
            &mut store,
        );

        assert_eq!(code, 0);
        assert!(out.starts_with("Added Jacob Mercer ("));
        assert!(err.is_empty());
        assert_eq!(store.contacts().len(), 5);
        assert_eq!(store.contacts()[0].name, "Jacob Mercer");
    }

    #[test]
    fn test_duplicate_add_exits_non_zero() {
        let mut store = memory_store();

        let (code, out, err) = run_args(
            &["contacts", "add", "--name", "Rosie Simpson", "--number", "000-00-00"],
            &mut store,
        );

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "Rosie Simpson is already in contacts\n");
        assert_eq!(store.contacts().len(), 4);

        let (code, _, err) = run_args(
            &["contacts", "add", "--name", "New Person", "--number", "443-89-12"],
            &mut store,
        );
        assert_eq!(code, 1);
        assert_eq!(err, "443-89-12 is already in contacts\n");
    }

    #[test]
    fn test_remove() {
        let mut store = memory_store();

        let (code, out, _) = run_args(&["contacts", "remove", "id-2"], &mut store);
        assert_eq!(code, 0);
        assert_eq!(out, "Removed id-2\n");
        assert!(store.contacts().iter().all(|c| c.id != "id-2"));

        let (code, _, _) = run_args(&["contacts", "remove", "id-2"], &mut store);
        assert_eq!(code, 0);
        assert_eq!(store.contacts().len(), 3);
    }

    #[test]
    fn test_list_with_filter() {
        let mut store = memory_store();

        let (code, out, _) = run_args(&["contacts", "list", "--filter", "ROS"], &mut store);
        assert_eq!(code, 0);
        assert_eq!(out, "id-1  Rosie Simpson: 459-12-56\n");

        let (_, out, _) = run_args(&["contacts", "list"], &mut store);
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_list_json() {
        let mut store = memory_store();

        let (_, out, _) = run_args(&["contacts", "list", "--filter", "kline", "--json"], &mut store);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["filter"], "kline");
        let contacts: Vec<Contact> = serde_json::from_value(value["contacts"].clone()).unwrap();
        assert_eq!(contacts, vec![Contact::new("id-2", "Hermione Kline", "443-89-12")]);
    }

    #[test]
    fn test_ephemeral_uses_memory_backend() {
        let config = PhonebookConfig::default();

        let cli = Cli::try_parse_from(["contacts", "--ephemeral", "list"]).unwrap();
        assert_eq!(storage_config(&cli, &config).backend, StorageBackend::Memory);

        let cli = Cli::try_parse_from(["contacts", "list", "--ephemeral"]).unwrap();
        assert_eq!(storage_config(&cli, &config).backend, StorageBackend::Memory);

        let cli = Cli::try_parse_from(["contacts", "list"]).unwrap();
        assert_eq!(storage_config(&cli, &config).backend, StorageBackend::Json);
    }

    #[test]
    fn test_add_requires_both_fields() {
        assert!(Cli::try_parse_from(["contacts", "add", "--name", "Only Name"]).is_err());
    }
}
