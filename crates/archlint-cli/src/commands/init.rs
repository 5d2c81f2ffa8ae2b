//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File name written by `archlint init`.
pub const CONFIG_FILE: &str = "archlint.yaml";

const DEFAULT_CONFIG: &str = r"# archlint rule set
#
# Listed rules run in catalog order; remove an entry or set `enabled: false`
# to skip it. Without any entries every rule runs with its defaults.
# Uncomment a `config` block to override a rule's defaults.

rules:
  - id: ARCH-ACYCLIC
    # config:
    #   allowedKinds: [sync, async, db]
    #   ignoreContainers: []

  - id: ARCH-CRUD
    # config:
    #   allowedTags: [crud, repo, relay]
    #   exclusiveTags: [repo]

  - id: ARCH-ACL
    # config:
    #   allowedTags: [acl]

  - id: ARCH-BOUNDARIES
    # config:
    #   minInternalToCrossRatio: 1.0
    #   maxCrossRelations: 0

  - id: ARCH-EXTERNAL-PROTOCOL
    # config:
    #   allowedPrefixes: ['https://gateway.', 'kafka://']
    #   requireProtocol: true

  - id: ARCH-DB-ISOLATION
    # config:
    #   requireInbound: true
";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);
    write_starter(config_path, force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: archlint check architecture.yaml");

    Ok(())
}

fn write_starter(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Rule-set file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
