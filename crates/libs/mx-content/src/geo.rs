use crate::GeoUriError;
use core::fmt;
use core::str::FromStr;

const SCHEME: &str = "geo:";

/// RFC 5870 `geo:` URI.
///
/// Accepts both `geo:lat,lon;u=30` and the older client form
/// `geo:lat,lon;30`, where a bare number as first parameter is the
/// uncertainty in meters. Other parameters (`crs=wgs84`, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoUri {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub uncertainty: Option<f64>,
}

impl GeoUri {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoUriError> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        Ok(Self { latitude, longitude, altitude: None, uncertainty: None })
    }

    pub fn with_uncertainty(mut self, meters: f64) -> Self {
        self.uncertainty = Some(meters);
        self
    }
}

impl FromStr for GeoUri {
    type Err = GeoUriError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let rest = input
            .get(..SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
            .map(|_| &input[SCHEME.len()..])
            .ok_or(GeoUriError::MissingScheme)?;
        let (coordinates, params) = rest.split_once(';').unwrap_or((rest, ""));

        let mut parts = coordinates.split(',');
        let latitude = parse_number("latitude", parts.next())?;
        let longitude = parse_number("longitude", parts.next())?;
        let altitude = match parts.next() {
            Some(raw) => Some(parse_number("altitude", Some(raw))?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(GeoUriError::TooManyCoordinates);
        }

        let mut geo = Self::new(latitude, longitude)?;
        geo.altitude = altitude;

        if !params.is_empty() {
            for (index, param) in params.split(';').map(str::trim).enumerate() {
                match param.split_once('=') {
                    Some((name, value)) if name.trim().eq_ignore_ascii_case("u") => {
                        geo.uncertainty = Some(parse_number("uncertainty", Some(value))?);
                    }
                    Some(_) => {}
                    None if index == 0 => {
                        geo.uncertainty = param.parse::<f64>().ok().or(geo.uncertainty);
                    }
                    None => {}
                }
            }
        }
        if let Some(uncertainty) = geo.uncertainty {
            if !(uncertainty >= 0.0 && uncertainty.is_finite()) {
                return Err(GeoUriError::OutOfRange {
                    component: "uncertainty",
                    value: uncertainty,
                });
            }
        }
        Ok(geo)
    }
}

impl fmt::Display for GeoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geo:{},{}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ",{altitude}")?;
        }
        if let Some(uncertainty) = self.uncertainty {
            write!(f, ";u={uncertainty}")?;
        }
        Ok(())
    }
}

fn parse_number(component: &'static str, raw: Option<&str>) -> Result<f64, GeoUriError> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty());
    let raw = raw.ok_or(GeoUriError::MissingComponent(component))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| GeoUriError::InvalidNumber { component, value: raw.to_string() })?;
    if !value.is_finite() {
        return Err(GeoUriError::InvalidNumber { component, value: raw.to_string() });
    }
    Ok(value)
}

fn check_range(component: &'static str, value: f64, limit: f64) -> Result<(), GeoUriError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(GeoUriError::OutOfRange { component, value })
    }
}

#[cfg(test)]
mod tests {
    use super::GeoUri;
    use crate::GeoUriError;

    #[test]
    fn parses_legacy_bare_uncertainty() {
        let geo: GeoUri = "geo:40.05,29.24;30".parse().expect("valid geo uri");
        assert_eq!(geo.latitude, 40.05);
        assert_eq!(geo.longitude, 29.24);
        assert_eq!(geo.altitude, None);
        assert_eq!(geo.uncertainty, Some(30.0));
    }

    #[test]
    fn parses_rfc_parameters() {
        let geo: GeoUri = "geo:48.2010,16.3695,183;crs=wgs84;u=40".parse().expect("valid geo uri");
        assert_eq!(geo.altitude, Some(183.0));
        assert_eq!(geo.uncertainty, Some(40.0));
        assert_eq!(geo.to_string(), "geo:48.201,16.3695,183;u=40");
    }

    #[test]
    fn scheme_and_parameter_names_ignore_case() {
        let geo: GeoUri = "Geo:1,2;U=15".parse().expect("valid geo uri");
        assert_eq!(geo.uncertainty, Some(15.0));
        let geo: GeoUri = "GEO:1,2;CRS=wgs84;u=5".parse().expect("valid geo uri");
        assert_eq!(geo.uncertainty, Some(5.0));
        assert_eq!(geo.to_string(), "geo:1,2;u=5");
        assert_eq!("ge:1,2".parse::<GeoUri>(), Err(GeoUriError::MissingScheme));
    }

    #[test]
    fn parses_coordinates_without_parameters() {
        let geo: GeoUri = "geo:1,2".parse().expect("valid geo uri");
        assert_eq!(geo.uncertainty, None);
        assert_eq!(geo.to_string(), "geo:1,2");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("1,2".parse::<GeoUri>(), Err(GeoUriError::MissingScheme));
        assert_eq!("geo:1".parse::<GeoUri>(), Err(GeoUriError::MissingComponent("longitude")));
        assert_eq!("geo:1,2,3,4".parse::<GeoUri>(), Err(GeoUriError::TooManyCoordinates));
        assert!(matches!(
            "geo:north,2".parse::<GeoUri>(),
            Err(GeoUriError::InvalidNumber { component: "latitude", .. })
        ));
        assert!(matches!(
            "geo:91,2".parse::<GeoUri>(),
            Err(GeoUriError::OutOfRange { component: "latitude", .. })
        ));
        assert!(matches!(
            "geo:1,2;u=-5".parse::<GeoUri>(),
            Err(GeoUriError::OutOfRange { component: "uncertainty", .. })
        ));
    }
}
