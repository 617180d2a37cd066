use crate::cli::ValidateArgs;
use crate::config::{FileConfig, validate_file_config};
use crate::error::Result;

pub fn run(args: ValidateArgs) -> Result<()> {
    let file_config = FileConfig::from_file(&args.config)?;
    validate_file_config(&file_config)?;
    println!("{} is a valid config", args.config.display());
    Ok(())
}
