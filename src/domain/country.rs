const TLD_SEGMENTS: &[(&str, &str)] = &[
    (".th", "TH"),
    (".us", "US"),
    (".sg", "SG"),
    (".jp", "JP"),
    (".uk", "UK"),
];

const OTHERS_SEGMENT: &str = "Others";

/// Buckets a registration into one of the coarse country segments
/// tracked by `AggregateStats`. Swappable so deployments can plug in a
/// geo-ip lookup or CDN header inspection instead.
pub trait CountryResolver: Send + Sync {
    fn resolve(&self, email: &str) -> String;
}

/// Default resolver: inspects the ccTLD suffix of the email domain and
/// falls back to the `Others` bucket.
pub struct TldCountryResolver;

impl CountryResolver for TldCountryResolver {
    fn resolve(&self, email: &str) -> String {
        let domain = match email.rsplit_once('@') {
            Some((_, domain)) => domain,
            None => email,
        };
        let domain = domain.to_ascii_lowercase();

        for (suffix, segment) in TLD_SEGMENTS {
            if domain.ends_with(suffix) {
                return (*segment).to_string();
            }
        }

        OTHERS_SEGMENT.to_string()
    }
}
