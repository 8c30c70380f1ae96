//! Command parsing and execution
//!
//! Commands write their result as JSON (or plain text for `validate` and
//! `format`) so the output can be piped into other tools.
//!
//! ```text
//! party-registry list
//! party-registry seed
//! party-registry add            < party.json
//! party-registry update <id>    < partial.json
//! party-registry delete <id>
//! party-registry validate <PF|PJ> <document>
//! party-registry format <PF|PJ> <document>
//! ```

use thiserror::Error;

use core_kernel::PartyId;
use domain_party::{
    DocumentValidator, DocumentVerdict, FieldValidationAdapter, PartyError, PartyForm,
    PartyRegistry, PartyType, PartyUpdate,
};

/// Usage text printed by `help` and on argument errors
pub const USAGE: &str = "\
usage: party-registry <command>

commands:
  list                          print all parties as JSON
  seed                          add the sample parties if the registry is empty
  add                           read a party as JSON from stdin and add it
  update <id>                   read a partial party as JSON from stdin and apply it
  delete <id>                   remove a party
  validate <PF|PJ> <document>   check a CPF/CNPJ
  format <PF|PJ> <document>     print a CPF/CNPJ in canonical form
  help                          show this message";

/// Errors raised while parsing or executing a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The arguments do not form a valid command
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),

    /// The domain rejected the request
    #[error(transparent)]
    Party(#[from] PartyError),

    /// Output could not be encoded
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Seed,
    Add,
    Update(PartyId),
    Delete(PartyId),
    Validate(PartyType, String),
    Format(PartyType, String),
    Help,
}

impl Command {
    /// Parses the arguments following the program name
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(CommandError::usage("missing command"));
        };

        match (name.as_str(), rest) {
            ("list", []) => Ok(Command::List),
            ("seed", []) => Ok(Command::Seed),
            ("add", []) => Ok(Command::Add),
            ("update", [id]) => Ok(Command::Update(parse_id(id)?)),
            ("delete", [id]) => Ok(Command::Delete(parse_id(id)?)),
            ("validate", [party_type, document]) => {
                Ok(Command::Validate(party_type.parse()?, document.clone()))
            }
            ("format", [party_type, document]) => {
                Ok(Command::Format(party_type.parse()?, document.clone()))
            }
            ("help" | "--help" | "-h", _) => Ok(Command::Help),
            (other, _) => Err(CommandError::usage(format!(
                "unknown command or wrong arguments: {other}"
            ))),
        }
    }

    /// Whether the command reads a JSON document from stdin
    pub fn reads_input(&self) -> bool {
        matches!(self, Command::Add | Command::Update(_))
    }
}

fn parse_id(raw: &str) -> Result<PartyId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::usage(format!("invalid party id: {raw}")))
}

/// Runs `command` against `registry` and returns the text to print
///
/// `input` is the JSON read from stdin for `add` and `update`; other
/// commands ignore it.
pub fn execute(
    command: &Command,
    registry: &mut PartyRegistry,
    input: &str,
) -> Result<String, CommandError> {
    match command {
        Command::List => Ok(serde_json::to_string_pretty(&*registry.list())?),
        Command::Seed => {
            let seeded = registry.seed_if_empty();
            Ok(if seeded {
                format!("seeded {} sample parties", registry.count())
            } else {
                format!("registry already holds {} parties, nothing seeded", registry.count())
            })
        }
        Command::Add => {
            let form = PartyForm::from_json(input)?;
            let party = form.submit(registry, None)?;
            tracing::info!(id = %party.id, "Party registered");
            Ok(serde_json::to_string_pretty(&party)?)
        }
        Command::Update(id) => {
            let existing = registry.get_by_id(*id).ok_or_else(|| PartyError::not_found(id))?;
            let update = PartyUpdate::from_json(input)?;
            if update.is_empty() {
                return Err(CommandError::usage("update needs at least one field"));
            }
            let mut form = PartyForm::from_party(&existing);
            form.apply(update);
            let party = form.submit(registry, Some(*id))?;
            tracing::info!(id = %party.id, "Party updated");
            Ok(serde_json::to_string_pretty(&party)?)
        }
        Command::Delete(id) => {
            if !registry.delete(*id) {
                return Err(PartyError::not_found(id).into());
            }
            tracing::info!(%id, "Party deleted");
            Ok(format!("deleted {id}"))
        }
        Command::Validate(party_type, document) => {
            if document.trim().is_empty() {
                return Ok(format!("{} is required", party_type.document_name()));
            }
            Ok(match FieldValidationAdapter::check(document, Some(*party_type)) {
                DocumentVerdict::Valid => format!("valid {}", party_type.document_name()),
                DocumentVerdict::Invalid(reason) => reason,
            })
        }
        Command::Format(party_type, document) => {
            Ok(DocumentValidator::format_document(document, *party_type))
        }
        Command::Help => Ok(USAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&args(&["list"])).unwrap(), Command::List);
        assert_eq!(
            Command::parse(&args(&["delete", "42"])).unwrap(),
            Command::Delete(PartyId::new(42))
        );
        assert_eq!(
            Command::parse(&args(&["validate", "pj", "11222333000181"])).unwrap(),
            Command::Validate(PartyType::Organization, "11222333000181".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse(&[]), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse(&args(&["delete", "abc"])), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse(&args(&["list", "extra"])), Err(CommandError::Usage(_))));
        assert!(matches!(
            Command::parse(&args(&["format", "XX", "1"])),
            Err(CommandError::Party(PartyError::InvalidPartyType(_)))
        ));
    }

    #[test]
    fn test_update_without_fields_is_rejected() {
        let mut registry = PartyRegistry::in_memory();
        registry.seed_if_empty();
        let before = registry.list();

        let result = execute(&Command::Update(PartyId::new(1)), &mut registry, "{}");

        assert!(matches!(result, Err(CommandError::Usage(_))));
        assert_eq!(registry.list(), before);
    }

    #[test]
    fn test_reads_input() {
        assert!(Command::Add.reads_input());
        assert!(Command::Update(PartyId::new(1)).reads_input());
        assert!(!Command::List.reads_input());
    }
}
