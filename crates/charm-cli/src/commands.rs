//! Command implementations.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, info};

use charm_events::{CharmBase, CharmError, EventKind};
use charm_framework::{EventBase, Framework};
use charm_metadata::{MetadataError, MetadataLoader};

use crate::cli::{CharmDirArgs, Cli, Command, EmitArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{print_output, EmitReport, FiredEvent, InspectReport, ValidateReport};
use crate::Exit;

fn loader(dir: Option<PathBuf>) -> MetadataLoader {
    dir.map(MetadataLoader::new).unwrap_or_else(MetadataLoader::from_env)
}

impl Cli {
    pub fn execute(self) -> Result<Exit, CliError> {
        match self.command {
            Command::Inspect(args) => inspect(args, self.format),
            Command::Validate(args) => validate(args, self.format),
            Command::Emit(args) => emit(args, self.format),
        }
    }
}

fn inspect(args: CharmDirArgs, format: OutputFormat) -> Result<Exit, CliError> {
    let framework = Framework::new();
    let metadata = loader(args.dir).load()?;
    let charm = CharmBase::new(&framework, None, metadata)?;

    print_output(format, &InspectReport::new(&charm))?;
    Ok(Exit::Success)
}

fn validate(args: CharmDirArgs, format: OutputFormat) -> Result<Exit, CliError> {
    let loader = loader(args.dir);
    let path = loader.metadata_path().display().to_string();
    let framework = Framework::new();

    let result = loader
        .load()
        .map_err(CharmError::from)
        .and_then(|metadata| CharmBase::new(&framework, None, metadata));

    let report = match result {
        Ok(charm) => {
            let metadata = charm.metadata();
            ValidateReport {
                path,
                valid: true,
                error: None,
                relations: metadata.relations.len(),
                storage: metadata.storage.len(),
                resources: metadata.resources.len(),
                payloads: metadata.payloads.len(),
                declarations: charm.on().len(),
            }
        }
        Err(CharmError::Metadata(e @ (MetadataError::NotFound { .. } | MetadataError::Io { .. }))) => {
            return Err(e.into());
        }
        Err(e) => {
            debug!(error = %e, "metadata failed validation");
            ValidateReport {
                path,
                valid: false,
                error: Some(e.to_string()),
                relations: 0,
                storage: 0,
                resources: 0,
                payloads: 0,
                declarations: 0,
            }
        }
    };

    print_output(format, &report)?;
    Ok(if report.valid {
        Exit::Success
    } else {
        Exit::ValidationError
    })
}

fn emit(args: EmitArgs, format: OutputFormat) -> Result<Exit, CliError> {
    let mut framework = Framework::new();
    let metadata = loader(args.dir).load()?;
    let charm = CharmBase::new(&framework, Some(args.handle.as_str()), metadata)?;

    // Resolve every key before anything fires.
    let targets = args
        .keys
        .iter()
        .map(|key| charm.on().require(key).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let fired = Rc::new(RefCell::new(Vec::new()));
    for (_, decl) in charm.on().events() {
        let fired = Rc::clone(&fired);
        framework.observe(decl, move |event: &EventBase<EventKind>| {
            info!(path = %event.path, kind = %event.kind, "observed event");
            fired.borrow_mut().push(FiredEvent {
                key: event.key.clone(),
                kind: event.kind.to_string(),
                path: event.path.clone(),
            });
        });
    }

    for target in &targets {
        let notified = framework.emit(target);
        debug!(key = target.key(), notified, "emitted event");
    }

    let report = EmitReport {
        fired: fired.take(),
    };
    print_output(format, &report)?;
    Ok(Exit::Success)
}
