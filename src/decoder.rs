//! Decoding of the *RMC* sentence of the *NMEA 0183* protocol.

use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

use err::{CoordinateParseError, DecodeError};

/// Identifier of the one recognized sentence.
const RMC_SENTENCE_ID: &'static str = "$GPRMC";
/// An RMC sentence carries exactly this many comma separated fields.
const RMC_FIELD_COUNT: usize = 13;

/// The cardinal directions.
#[derive(Debug)]
enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    #[inline]
    fn from_field(field: &str) -> Option<CardDir> {
        match field {
            "N" => Some(CardDir::North),
            "S" => Some(CardDir::South),
            "E" => Some(CardDir::East),
            "W" => Some(CardDir::West),
            _ => None,
        }
    }

    #[inline]
    fn get_sign(&self) -> f64 {
        match self {
            CardDir::North | CardDir::East => 1.0,
            CardDir::South | CardDir::West => -1.0,
        }
    }
}

/// A decoded RMC (Recommended Minimum Navigation Information) sentence.
#[derive(Debug)]
pub struct RmcSentence {
    /// Universal Time Coordinated (UTC) of the fix.
    pub utc: Option<NaiveTime>,
    /// Latitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the northern hemisphere.
    /// A negative value indicates that the coordinate is in the southern hemisphere.
    pub lat: f64,
    /// Longitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the eastern hemisphere.
    /// A negative value indicates that the coordinate is in the western hemisphere.
    pub long: f64,
    /// Speed over ground in knots.
    pub speed: Option<f64>,
    /// Course over ground in degrees true.
    pub course: Option<f64>,
    /// Date of the fix.
    pub date: Option<NaiveDate>,
    /// Magnetic variation in degrees; westerly variation is negative.
    pub variation: Option<f64>,
}

impl RmcSentence {
    /// Decode `sentence` as an RMC sentence.
    ///
    /// The sentence must carry the recognized identifier, exactly 13 comma
    /// separated fields and a valid fix status. The position pair is
    /// mandatory; the remaining fields decode to `None` when absent or
    /// malformed.
    pub fn parse(sentence: &str) -> Result<RmcSentence, DecodeError> {
        let fields: Vec<&str> = sentence.split(',').collect();
        if fields[0] != RMC_SENTENCE_ID {
            return Err(DecodeError::UnexpectedSentenceType);
        }
        if fields.len() != RMC_FIELD_COUNT {
            return Err(DecodeError::FieldCount(fields.len()));
        }
        if fields[2] != "A" {
            return Err(DecodeError::NoFix);
        }

        let lat = to_decimal(fields[3], fields[4])?;
        let long = to_decimal(fields[5], fields[6])?;

        let variation = f64::from_str(fields[10]).ok().map(|v| {
            let sign = CardDir::from_field(fields[11])
                .map(|d| d.get_sign())
                .unwrap_or(1.0);
            v * sign
        });

        Ok(RmcSentence {
            utc: NaiveTime::parse_from_str(fields[1], "%H%M%S%.f").ok(),
            lat,
            long,
            speed: f64::from_str(fields[7]).ok(),
            course: f64::from_str(fields[8]).ok(),
            date: NaiveDate::parse_from_str(fields[9], "%d%m%y").ok(),
            variation,
        })
    }
}

/// Extract the position pair from an RMC sentence.
///
/// Returns `None` for anything that is not a well formed RMC sentence with
/// a valid fix. A malformed numeric field fails the whole sentence; no
/// partial coordinate is ever returned.
pub fn decode(sentence: &str) -> Option<(f64, f64)> {
    RmcSentence::parse(sentence)
        .ok()
        .map(|rmc| (rmc.lat, rmc.long))
}

/// Convert a `ddmm.mmmm` (or `dddmm.mmmm`) value and its hemisphere letter
/// to signed decimal degrees.
///
/// The two digits right before the decimal point are always whole minutes;
/// whatever precedes them is degrees. That positional rule is what lets the
/// two digit latitude and three digit longitude degree fields share one
/// conversion. A value that does not split into exactly two parts around
/// the decimal point converts to zero.
fn to_decimal(value: &str, hemisphere: &str) -> Result<f64, CoordinateParseError> {
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() != 2 {
        return Ok(0.0);
    }

    let (deg, min_whole) = parts[0].split_at(parts[0].len().saturating_sub(2));

    let degrees = if deg.is_empty() {
        0.0
    } else {
        f64::from_str(deg).map_err(CoordinateParseError::Degrees)?
    };
    let mut minutes = f64::from_str(min_whole).map_err(CoordinateParseError::Minutes)?;
    let fraction = f64::from_str(parts[1]).map_err(CoordinateParseError::MinuteFraction)?;
    minutes += fraction / 10f64.powi(parts[1].len() as i32);

    let sign = CardDir::from_field(hemisphere)
        .map(|d| d.get_sign())
        .unwrap_or(1.0);
    Ok(sign * (degrees + minutes / 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &'static str =
        "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A";

    const EPSILON: f64 = 1e-4;

    #[test]
    fn decodes_canonical_sentence() {
        let (lat, long) = decode(CANONICAL).unwrap();
        assert!((lat - 48.1173).abs() < EPSILON);
        assert!((long - 11.5166667).abs() < EPSILON);
    }

    #[test]
    fn decodes_sentence_with_checksum_trailer() {
        let sentence =
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*07";
        let (lat, long) = decode(sentence).unwrap();
        assert!((lat - 48.1173).abs() < EPSILON);
        assert!((long - 11.5166667).abs() < EPSILON);
    }

    #[test]
    fn southern_western_hemispheres_negate() {
        let sentence =
            "$GPRMC,123519,A,4807.038,S,01131.000,W,022.4,084.4,230394,003.1,W,A";
        let (lat, long) = decode(sentence).unwrap();
        assert!((lat + 48.1173).abs() < EPSILON);
        assert!((long + 11.5166667).abs() < EPSILON);
    }

    #[test]
    fn rejects_invalid_fix() {
        let sentence =
            "$GPRMC,123519,V,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A";
        assert_matches!(decode(sentence), None);
        assert_matches!(RmcSentence::parse(sentence), Err(DecodeError::NoFix));
    }

    #[test]
    fn rejects_other_sentence_types() {
        let sentence = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        assert_matches!(decode(sentence), None);
        assert_matches!(
            RmcSentence::parse(sentence),
            Err(DecodeError::UnexpectedSentenceType)
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let sentence = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
        assert_matches!(decode(sentence), None);
        assert_matches!(
            RmcSentence::parse(sentence),
            Err(DecodeError::FieldCount(12))
        );
    }

    #[test]
    fn malformed_latitude_fails_whole_decode() {
        let sentence =
            "$GPRMC,123519,A,48o7.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A";
        assert_matches!(decode(sentence), None);
        assert_matches!(
            RmcSentence::parse(sentence),
            Err(DecodeError::Coordinate(CoordinateParseError::Minutes(_)))
        );
    }

    #[test]
    fn dotless_value_converts_to_zero() {
        let sentence =
            "$GPRMC,123519,A,4807038,N,01131.000,E,022.4,084.4,230394,003.1,W,A";
        let (lat, long) = decode(sentence).unwrap();
        assert_eq!(lat, 0.0);
        assert!((long - 11.5166667).abs() < EPSILON);
    }

    #[test]
    fn parses_remaining_fields() {
        let rmc = RmcSentence::parse(CANONICAL).unwrap();
        assert_eq!(rmc.utc, Some(NaiveTime::from_hms(12, 35, 19)));
        assert_eq!(rmc.date, Some(NaiveDate::from_ymd(1994, 3, 23)));
        assert_eq!(rmc.speed, Some(22.4));
        assert_eq!(rmc.course, Some(84.4));
        assert_eq!(rmc.variation, Some(-3.1));
    }

    #[test]
    fn short_values_treat_leading_digits_as_minutes() {
        assert!((to_decimal("807.5", "N").unwrap() - (8.0 + 7.5 / 60.0)).abs() < EPSILON);
        assert!((to_decimal("7.5", "N").unwrap() - 7.5 / 60.0).abs() < EPSILON);
        assert!((to_decimal("07.5", "S").unwrap() + 7.5 / 60.0).abs() < EPSILON);
    }
}
