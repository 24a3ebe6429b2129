use anyhow::{Context, Result};
use commentfmt::{Config, highlight};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    if config.list_styles {
        for name in highlight::available_styles() {
            println!("{}", name);
        }
        return Ok(());
    }

    let formatter = config.formatter();
    log::debug!("using {:?}", formatter);

    if config.stylesheet {
        let css = formatter
            .stylesheet()
            .context("Failed to generate stylesheet")?;
        print!("{}", css);
        return Ok(());
    }

    let text = config.read_input()?;
    let html = formatter.format_or_escape(&text);
    print!("{}", html);

    Ok(())
}
