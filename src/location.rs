//! Location resolution: cached file, IP geolocation, then manual entry

use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

const CACHE_FILE: &str = ".mawaqit_location";
const TIMEOUT: Duration = Duration::from_secs(5);

/// Where prayer times should be looked up
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
}

/// Source of interactive input. Injectable so the resolver can be driven
/// from a script in tests instead of a real console.
pub trait Prompt {
    /// Print the prompt and read one line of input, trimmed
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String>;
}

/// Prompt backed by the real console
pub struct Console;

impl Prompt for Console {
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .context("Error reading input")?;
        Ok(line.trim().to_owned())
    }
}

/// Resolve a location by trying a chain of strategies in order: the cache
/// file, two IP-geolocation services, and finally manual entry
pub struct Resolver<P> {
    prompt: P,
    cache_path: Option<PathBuf>,
}

impl Resolver<Console> {
    pub fn new() -> Self {
        Self::with(Console, dirs::home_dir().map(|home| home.join(CACHE_FILE)))
    }
}

impl<P: Prompt> Resolver<P> {
    fn with(prompt: P, cache_path: Option<PathBuf>) -> Self {
        Self { prompt, cache_path }
    }

    /// Produce a (country, city) pair. A cached location always wins, even
    /// over `force_manual` (long-standing precedence, kept as-is). Service
    /// failures fall through to the next strategy and never propagate.
    pub fn resolve(&mut self, force_manual: bool) -> anyhow::Result<Location> {
        if let Some(location) = self.cached() {
            info!("Using cached location: {}, {}", location.city, location.country);
            return Ok(location);
        }

        if force_manual {
            return self.manual();
        }

        for service in [GeoService::IpApi, GeoService::IpInfo] {
            match service.detect() {
                Ok(location) => return self.confirm(location),
                Err(err) => warn!("{} unavailable: {err:#}", service.host()),
            }
        }

        println!("\nCould not automatically determine your location.");
        self.manual()
    }

    /// Read the cache file. Any failure (missing, unreadable, corrupt) just
    /// means there is no cached location.
    fn cached(&self) -> Option<Location> {
        let path = self.cache_path.as_ref()?;
        let file = File::open(path).ok()?;
        match serde_json::from_reader(file) {
            Ok(location) => Some(location),
            Err(err) => {
                debug!("Ignoring corrupt location cache {path:?}: {err}");
                None
            }
        }
    }

    /// Show a detected location and ask the user to accept it. Anything
    /// other than an accept drops into manual entry.
    fn confirm(&mut self, location: Location) -> anyhow::Result<Location> {
        println!("\nAutomatic location detection might not be accurate.");
        println!("Detected: {}, {}", location.city, location.country);
        let choice = self.prompt.ask("Use this location? (y/n): ")?;
        if choice.eq_ignore_ascii_case("y") {
            Ok(location)
        } else {
            self.manual()
        }
    }

    fn manual(&mut self) -> anyhow::Result<Location> {
        println!("\nEnter your location manually:");
        let country = self.prompt.ask("Country (e.g., Egypt): ")?;
        let city = self.prompt.ask("City (e.g., Fuwwah): ")?;
        let location = Location { country, city };
        self.save(&location);
        Ok(location)
    }

    /// Persist a manually entered location for future runs. A failed write
    /// is not fatal, it just means we ask again next time.
    fn save(&self, location: &Location) {
        let Some(path) = self.cache_path.as_ref() else {
            return;
        };
        let result = File::create(path)
            .map_err(anyhow::Error::from)
            .and_then(|file| Ok(serde_json::to_writer(file, location)?));
        if let Err(err) = result {
            warn!("Error saving location to {path:?}: {err:#}");
        }
    }
}

/// The two IP-geolocation endpoints, tried in order. Free tiers, no auth;
/// each shapes its body a little differently.
#[derive(Copy, Clone, Debug)]
enum GeoService {
    IpApi,
    IpInfo,
}

impl GeoService {
    fn host(self) -> &'static str {
        match self {
            Self::IpApi => "ip-api.com",
            Self::IpInfo => "ipinfo.io",
        }
    }

    /// Look up the caller's location by IP. Success is inferred from the
    /// fields the service bothered to include.
    fn detect(self) -> anyhow::Result<Location> {
        match self {
            Self::IpApi => {
                let body: IpApiBody = get("http://ip-api.com/json/")?;
                if body.status.as_deref() == Some("success") {
                    if let (Some(country), Some(city)) = (body.country, body.city) {
                        return Ok(Location { country, city });
                    }
                }
                Err(anyhow!("Unrecognized response from {}", self.host()))
            }
            Self::IpInfo => {
                let body: IpInfoBody = get("https://ipinfo.io/json")?;
                match (body.country, body.city) {
                    (Some(country), Some(city)) => Ok(Location { country, city }),
                    _ => Err(anyhow!("Unrecognized response from {}", self.host())),
                }
            }
        }
    }
}

fn get<T: DeserializeOwned>(url: &str) -> anyhow::Result<T> {
    info!("Detecting location via {url}");
    let response = ureq::get(url)
        .timeout(TIMEOUT)
        .call()
        .with_context(|| format!("Error contacting {url}"))?;
    response
        .into_json()
        .with_context(|| format!("Error parsing response from {url}"))
}

#[derive(Debug, Deserialize)]
struct IpApiBody {
    status: Option<String>,
    country: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpInfoBody {
    // Note: this service reports the country as an ISO code ("EG"), which
    // the Aladhan API accepts just the same
    country: Option<String>,
    city: Option<String>,
}
