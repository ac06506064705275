//! Coarse IP-to-country resolution for click analytics.
//!
//! Lookups are local (MaxMind GeoLite2 database loaded at startup) so the
//! click worker never waits on the network. Any miss or failure resolves to
//! `None`, which the caller records as "Unknown".

use std::net::IpAddr;

use maxminddb::Reader;
use tracing::trace;

/// Maps a client address to a coarse country label.
///
/// Implementations must be infallible from the caller's point of view:
/// failure is `None`, never an error.
pub trait GeoResolver: Send + Sync {
    fn lookup(&self, ip: IpAddr) -> Option<String>;

    /// Provider name, for startup logging.
    fn name(&self) -> &'static str;
}

/// MaxMind GeoLite2 backed resolver.
pub struct MaxMindGeoResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxMindGeoResolver {
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }
}

impl GeoResolver for MaxMindGeoResolver {
    fn lookup(&self, ip: IpAddr) -> Option<String> {
        let result = self.reader.lookup(ip).ok()?;
        let country: maxminddb::geoip2::Country = result.decode().ok()??;

        let iso = country.country.iso_code.map(String::from);
        trace!("geoip lookup for {ip}: {iso:?}");
        iso
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

/// Resolver used when no GeoIP database is configured; every lookup misses.
pub struct NullGeoResolver;

impl GeoResolver for NullGeoResolver {
    fn lookup(&self, _ip: IpAddr) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "Null"
    }
}
