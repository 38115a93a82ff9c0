pub mod device;

use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use device::{handle_info, handle_list, handle_rumble, handle_watch};

use crate::{config::Config, input::manager::Environment};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a config file to use instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List all input controllers
    List,
    /// Display the components and rumblers of a controller
    Info {
        /// Controller index as shown by 'list'
        index: usize,
    },
    /// Print normalized events of a controller until interrupted
    Watch {
        /// Controller index as shown by 'list'
        index: usize,
        /// Time between two polls in milliseconds
        #[arg(long, default_value_t = 16)]
        interval_ms: u64,
    },
    /// Play a rumble effect on every rumbler of a controller
    Rumble {
        /// Controller index as shown by 'list'
        index: usize,
        /// Intensity between 0.0 and 1.0
        intensity: f32,
        /// How long to rumble in milliseconds
        #[arg(long, default_value_t = 500)]
        duration_ms: u64,
    },
}

pub async fn main_cli(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match args.config {
        Some(path) => Config::from_yaml_path(&path)
            .map_err(|e| format!("Unable to load config {}: {e}", path.display()))?,
        None => Config::load(),
    };
    let environment = Environment::new(config);
    let mut controllers = environment.enumerate();

    let result = match args.cmd {
        Commands::List => handle_list(&controllers),
        Commands::Info { index } => handle_info(&controllers, index),
        Commands::Watch { index, interval_ms } => {
            handle_watch(&mut controllers, index, interval_ms).await
        }
        Commands::Rumble {
            index,
            intensity,
            duration_ms,
        } => handle_rumble(&controllers, index, intensity, duration_ms).await,
    };

    for controller in controllers.iter_mut() {
        controller.close();
    }

    result
}
