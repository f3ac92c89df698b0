use anyhow::Result;
use pico_args::Arguments;
use powerline_segments::config::{self, CONFIG_ENV};
use powerline_segments::prompt::render_prompt;
use powerline_segments::utils::debug;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
struct Args {
    theme: Option<String>,
    config: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn from_env() -> Result<Self> {
        let mut args = Arguments::from_env();

        Ok(Self {
            help: args.contains(["-h", "--help"]),
            theme: args.opt_value_from_str("--theme")?,
            config: args
                .opt_value_from_str::<_, PathBuf>("--config")?
                .or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from)),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::from_env()?;

    if args.help {
        print_help();
        return Ok(());
    }

    let mut config = config::load_config(args.config).await?;
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    debug(&format!("theme {}, segments {:?}", config.theme, config.segments));

    let powerline = render_prompt(&config).await;
    print!("{}", powerline.draw(should_use_colors()));

    Ok(())
}

fn should_use_colors() -> bool {
    env::var_os("NO_COLOR").is_none() && env::var("TERM").map_or(true, |term| term != "dumb")
}

fn print_help() {
    println!("powerline-segments - battery and jobs segments for powerline prompts");
    println!();
    println!("USAGE:");
    println!("    powerline-segments [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --theme <THEME>        Theme: default, basic [default: default]");
    println!("    --config <FILE>        Custom config file path");
    println!("    -h, --help             Show this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    POWERLINE_SEGMENTS_THEME     Override theme");
    println!("    POWERLINE_SEGMENTS_CONFIG    Override config path");
    println!("    POWERLINE_SEGMENTS_PLATFORM  Force platform family: darwin, cygwin, posix");
    println!("    POWERLINE_SEGMENTS_DEBUG     Enable debug logging");
    println!("    BATT_LEVEL / BATT_STATUS     Fake battery reading (skips the probe)");
}
