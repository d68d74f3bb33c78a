//! CLI argument definitions using clap
//!
//! Commands:
//! - shopfront products
//! - shopfront show <PRODUCT>
//! - shopfront add <PRODUCT> [--variant <VARIANT>]
//! - shopfront remove <PRODUCT> <VARIANT>
//! - shopfront clear
//! - shopfront cart [--json]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shopfront - browse a catalog and keep a persistent cart
#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog products
    Products,

    /// Show one product and its variants
    Show {
        /// Product id
        product: String,
    },

    /// Add one unit of a product variant to the cart
    Add {
        /// Product id
        product: String,

        /// Variant id (default: first available variant)
        #[arg(long)]
        variant: Option<String>,
    },

    /// Remove a line from the cart
    Remove {
        /// Product id
        product: String,

        /// Variant id
        variant: String,
    },

    /// Empty the cart
    Clear,

    /// Show cart lines and total
    Cart {
        /// Print the cart as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_variant() {
        let cli = Cli::try_parse_from(["shopfront", "add", "p1", "--variant", "v2"]).unwrap();
        match cli.command {
            Command::Add { product, variant } => {
                assert_eq!(product, "p1");
                assert_eq!(variant.as_deref(), Some("v2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["shopfront", "cart", "--config", "/tmp/s.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
        assert!(matches!(cli.command, Command::Cart { json: false }));
    }

    #[test]
    fn test_remove_requires_variant() {
        assert!(Cli::try_parse_from(["shopfront", "remove", "p1"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
