use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sketchify::{Config, Processor};

#[derive(Parser, Debug)]
#[command(name = "sketchify", version, about = "Convert photos into pencil-sketch renderings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an image as a pencil or artistic sketch
    Process {
        /// Input image path
        input: PathBuf,

        /// Output image path; format is chosen from the extension
        output: PathBuf,

        /// Rendering mode: "pencil" or "art"
        mode: String,

        /// Line thickness, pencil mode only
        #[arg(default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
        thickness: u8,

        /// Mood tag, art mode only (unknown tags fall back to neutral)
        #[arg(default_value = "neutral")]
        mood: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Process {
            input,
            output,
            mode,
            thickness,
            mood,
        } => {
            let config = Config::from_env();
            let processor = Processor::from_config(&config);
            processor.run(&input, &output, &mode, thickness, &mood)?;
            println!("{}", output.display());
        }
    }

    Ok(())
}
