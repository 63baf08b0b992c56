mod countdown;
mod location;
mod render;
mod timings;

use chrono::Local;
use clap::Parser;
use location::Resolver;
use log::{error, LevelFilter};

/// Show today's prayer times and a countdown to the next prayer
#[derive(Debug, Parser)]
#[command(name = "mawaqit")]
struct Cli {
    /// Skip IP geolocation and enter the location by hand
    #[arg(long)]
    manual: bool,
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
    let cli = Cli::parse();

    let location = match Resolver::new().resolve(cli.manual) {
        Ok(location) => location,
        Err(err) => {
            error!("{err:#}");
            println!("Could not determine your location");
            return;
        }
    };

    let data = match timings::fetch(&location) {
        Ok(data) => data,
        Err(err) => {
            println!("Error fetching prayer times: {err:#}");
            println!("Could not fetch prayer times");
            return;
        }
    };

    let now = Local::now().naive_local();
    let (next, remaining) = countdown::next_prayer(&data.timings, now);
    render::print_report(
        &location,
        &data,
        next,
        &countdown::format_remaining(remaining),
    );
}
