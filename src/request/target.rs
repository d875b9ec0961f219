use crate::request::HotelRecord;

/// Classification tag routing a fetched page to its extractor
///
/// One variant per known page type, so dispatch is exhaustive. The
/// hotel-detail variant carries the record already harvested from the
/// city listing page; the detail fetch itself is a pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTag {
    HomePage,
    CountryList,
    Country,
    City,
    HotelDetail(Box<HotelRecord>),
}

impl PageTag {
    /// Converts the tag to its queue kind string
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::HomePage => "home-page",
            Self::CountryList => "country-list",
            Self::Country => "country",
            Self::City => "city",
            Self::HotelDetail(_) => "hotel-detail",
        }
    }

    /// Serialized payload stored alongside the kind string, if any
    pub fn payload_json(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            Self::HotelDetail(record) => serde_json::to_string(record).map(Some),
            _ => Ok(None),
        }
    }

    /// Rebuilds a tag from its persisted kind string and payload
    ///
    /// Returns None for kinds this build does not recognize, or for a
    /// hotel-detail row whose payload no longer decodes. Such requests are
    /// still fetched, then dropped without effect.
    pub fn from_parts(kind: &str, payload: Option<&str>) -> Option<Self> {
        match kind {
            "home-page" => Some(Self::HomePage),
            "country-list" => Some(Self::CountryList),
            "country" => Some(Self::Country),
            "city" => Some(Self::City),
            "hotel-detail" => {
                let record: HotelRecord = serde_json::from_str(payload?).ok()?;
                Some(Self::HotelDetail(Box::new(record)))
            }
            _ => None,
        }
    }
}

/// A pending unit of work: an absolute URL plus its page tag
///
/// The URL must be absolute before construction (extractors run every
/// discovered href through the normalizer first). The queue dedups on the
/// URL string, so enqueueing the same URL twice is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlTarget {
    pub url: String,
    pub tag: PageTag,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, tag: PageTag) -> Self {
        Self {
            url: url.into(),
            tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_navigation_tags() {
        for tag in [
            PageTag::HomePage,
            PageTag::CountryList,
            PageTag::Country,
            PageTag::City,
        ] {
            let kind = tag.kind_str();
            let payload = tag.payload_json().unwrap();
            assert!(payload.is_none());
            assert_eq!(PageTag::from_parts(kind, None), Some(tag));
        }
    }

    #[test]
    fn test_hotel_detail_round_trip() {
        let record = HotelRecord {
            name: Some("Hotel Test".to_string()),
            url: "https://www.hrs.com/h-1".to_string(),
            review_rating: Some(7.8),
            ..Default::default()
        };
        let tag = PageTag::HotelDetail(Box::new(record));

        let payload = tag.payload_json().unwrap();
        assert!(payload.is_some());

        let rebuilt = PageTag::from_parts("hotel-detail", payload.as_deref()).unwrap();
        assert_eq!(rebuilt, tag);
    }

    #[test]
    fn test_unknown_kind_yields_none() {
        assert_eq!(PageTag::from_parts("region-index", None), None);
    }

    #[test]
    fn test_hotel_detail_without_payload_yields_none() {
        assert_eq!(PageTag::from_parts("hotel-detail", None), None);
        assert_eq!(PageTag::from_parts("hotel-detail", Some("not json")), None);
    }
}
