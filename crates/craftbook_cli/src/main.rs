//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `craftbook_core` linkage.
//! - Drive one scripted session through add, filter, undo and redo.
//! - Keep output deterministic for quick local sanity checks.

use craftbook_core::{Contact, ContactBook, ContactService, LogConfig};
use log::{info, warn};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging_from_env();

    println!("craftbook_core ping={}", craftbook_core::ping());
    println!("craftbook_core version={}", craftbook_core::core_version());

    match run_session() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smoke session failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// File logging is opt-in through `CRAFTBOOK_LOG_DIR`.
fn init_logging_from_env() {
    match LogConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = craftbook_core::init_logging_with(config) {
                eprintln!("logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }
}

fn run_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut service = ContactService::new(ContactBook::new());

    service.add_contact(Contact::parse(
        "Alice Pauline",
        "94351253",
        "alice@example.com",
        "123, Jurong West Ave 6, #08-111",
        &["friends"],
    )?)?;
    service.add_contact(Contact::parse(
        "Benson Meier",
        "98765432",
        "johnd@example.com",
        "311, Clementi Ave 2, #02-25",
        &["owesMoney", "friends"],
    )?)?;
    print_book("after add", &service);

    let listed = service.filter_by_name("Alixe");
    println!("filter name=Alixe listed={listed}");
    for contact in service.filtered_contacts() {
        println!("  {contact}");
    }

    let removed = service.delete_at(0)?;
    info!("event=smoke_delete module=cli status=ok");
    println!("deleted {}", removed.name);

    for undone in service.undo_multiple(2) {
        println!("undo: {undone}");
    }
    print_book("after undo", &service);

    match service.redo() {
        Ok(redone) => println!("redo: {redone}"),
        Err(err) => warn!("event=smoke_redo module=cli status=error message={err}"),
    }
    print_book("after redo", &service);
    Ok(())
}

fn print_book(label: &str, service: &ContactService) {
    println!("{label} size={}", service.book().len());
    for contact in service.book().iter() {
        println!("  {contact}");
    }
}
