//! Response decoders
//!
//! Element and attribute names are the service's wire contract and are
//! matched literally, namespace prefix included. Positions are written as
//! `"longitude latitude"`.

use std::time::Duration;

use domain::{AccessibleArea, Address, Coordinate, GeocodedLocation, Isochrone, RoutePath};
use tracing::debug;

use crate::error::OpenLsError;
use crate::parse::{parse_distance, parse_duration};
use crate::xml::XmlElement;

const GML_POS: &str = "gml:pos";

const ROUTE_RESPONSE: [&str; 3] = ["xls:XLS", "xls:Response", "xls:DetermineRouteResponse"];
const ROUTE_LINE: [&str; 2] = ["xls:RouteGeometry", "gml:LineString"];
const ROUTE_SUMMARY: &str = "xls:RouteSummary";
const TOTAL_TIME: &str = "xls:TotalTime";
const TOTAL_DISTANCE: &str = "xls:TotalDistance";

const GEOCODE_LIST: [&str; 4] = [
    "xls:XLS",
    "xls:Response",
    "xls:GeocodeResponse",
    "xls:GeocodeResponseList",
];
const GEOCODED_ADDRESS: &str = "xls:GeocodedAddress";
const POINT: &str = "gml:Point";
const ADDRESS: &str = "xls:Address";
const STREET_ADDRESS: &str = "xls:StreetAddress";
const STREET: &str = "xls:Street";
const BUILDING: &str = "xls:Building";
const PLACE: &str = "xls:Place";
const POSTAL_CODE: &str = "xls:PostalCode";

const ACCESSIBILITY_RESPONSE: [&str; 3] =
    ["aas:AAS", "aas:Response", "aas:AccessibilityResponse"];
const ACCESSIBILITY_GEOMETRY: &str = "aas:AccessibilityGeometry";
const ISOCHRONE: &str = "aas:Isochrone";
const ISOCHRONE_RING: [&str; 4] = [
    "aas:IsochroneGeometry",
    "gml:Polygon",
    "gml:exterior",
    "gml:LinearRing",
];

/// Parse a `"longitude latitude"` position
#[must_use]
pub fn parse_position(text: &str) -> Option<Coordinate> {
    let mut components = text.split_whitespace();
    let longitude: f64 = components.next()?.parse().ok()?;
    let latitude: f64 = components.next()?.parse().ok()?;
    Some(Coordinate::new(latitude, longitude))
}

/// Parseable positions among the `gml:pos` children, in order
fn positions(element: &XmlElement) -> Vec<Coordinate> {
    element
        .children(GML_POS)
        .filter_map(|pos| parse_position(pos.text()))
        .collect()
}

/// Decode a route response
///
/// # Errors
///
/// - [`OpenLsError::DecodeError`] if the body is not well-formed XML
/// - [`OpenLsError::RouteNotFound`] if the route geometry carries no
///   position list, which is how the service reports that no path exists
pub fn decode_route(xml: &str) -> Result<RoutePath, OpenLsError> {
    let document = XmlElement::parse_document(xml)?;
    let response = document.descend(&ROUTE_RESPONSE);

    let line = response
        .and_then(|r| r.descend(&ROUTE_LINE))
        .filter(|line| line.child(GML_POS).is_some())
        .ok_or(OpenLsError::RouteNotFound)?;
    let waypoints = positions(line);

    let summary = response.and_then(|r| r.child(ROUTE_SUMMARY));
    let duration = summary
        .and_then(|s| s.child(TOTAL_TIME))
        .and_then(|time| parse_duration(time.text()));
    let distance = summary
        .and_then(|s| s.child(TOTAL_DISTANCE))
        .and_then(|total| {
            parse_distance(total.attribute("value")?, total.attribute("uom"))
        });

    debug!(
        waypoints = waypoints.len(),
        ?duration,
        ?distance,
        "Decoded route"
    );
    Ok(RoutePath {
        waypoints,
        duration,
        distance,
    })
}

/// Decode a geocode response into candidates in response order
///
/// Candidates without a readable position are skipped. Address fields the
/// response does not carry are left empty.
///
/// # Errors
///
/// Returns [`OpenLsError::DecodeError`] if the body is not well-formed XML
/// or lacks the geocode response list.
pub fn decode_geocoded_locations(xml: &str) -> Result<Vec<GeocodedLocation>, OpenLsError> {
    let document = XmlElement::parse_document(xml)?;
    let list = document.descend(&GEOCODE_LIST).ok_or_else(|| {
        OpenLsError::DecodeError(format!("missing element {}", GEOCODE_LIST.join("/")))
    })?;

    let locations: Vec<GeocodedLocation> = list
        .children(GEOCODED_ADDRESS)
        .filter_map(decode_geocoded_address)
        .collect();

    debug!(count = locations.len(), "Decoded geocoded locations");
    Ok(locations)
}

fn decode_geocoded_address(element: &XmlElement) -> Option<GeocodedLocation> {
    let coordinate = element
        .descend(&[POINT, GML_POS])
        .and_then(|pos| parse_position(pos.text()))?;
    let address = element
        .child(ADDRESS)
        .map(decode_address)
        .unwrap_or_default();
    Some(GeocodedLocation::new(coordinate, address))
}

fn decode_address(element: &XmlElement) -> Address {
    let place = |kind: &str| {
        element
            .child_with_attribute(PLACE, "type", kind)
            .map(|place| place.text().to_string())
            .unwrap_or_default()
    };

    let street_address = element.child(STREET_ADDRESS);
    let street_name = street_address
        .and_then(|s| s.child(STREET))
        .and_then(|s| s.attribute("officialName"));
    let building_number = street_address
        .and_then(|s| s.child(BUILDING))
        .and_then(|b| b.attribute("number"));
    let street = match (street_name, building_number) {
        (Some(name), Some(number)) => format!("{name} {number}"),
        (Some(name), None) => name.to_string(),
        (None, _) => String::new(),
    };

    Address {
        street,
        city: place("Municipality"),
        postal_code: element
            .child(POSTAL_CODE)
            .map(|code| code.text().to_string())
            .unwrap_or_default(),
        state: place("CountrySubdivision"),
        country: place("Country"),
        iso_country_code: element
            .attribute("countryCode")
            .unwrap_or_default()
            .to_string(),
    }
}

/// Decode an accessibility response around `origin`
///
/// Isochrones without a readable `time` attribute are dropped.
///
/// # Errors
///
/// Returns [`OpenLsError::DecodeError`] if the body is not well-formed XML
/// or lacks the accessibility response element.
pub fn decode_accessible_area(
    xml: &str,
    origin: Coordinate,
) -> Result<AccessibleArea, OpenLsError> {
    let document = XmlElement::parse_document(xml)?;
    let response = document.descend(&ACCESSIBILITY_RESPONSE).ok_or_else(|| {
        OpenLsError::DecodeError(format!(
            "missing element {}",
            ACCESSIBILITY_RESPONSE.join("/")
        ))
    })?;

    let isochrones: Vec<Isochrone> = response
        .child(ACCESSIBILITY_GEOMETRY)
        .map(|geometry| {
            geometry
                .children(ISOCHRONE)
                .filter_map(decode_isochrone)
                .collect()
        })
        .unwrap_or_default();

    debug!(count = isochrones.len(), "Decoded isochrones");
    Ok(AccessibleArea { origin, isochrones })
}

fn decode_isochrone(element: &XmlElement) -> Option<Isochrone> {
    let seconds: f64 = element.attribute("time")?.parse().ok()?;
    let time = Duration::try_from_secs_f64(seconds).ok()?;
    let border = element
        .descend(&ISOCHRONE_RING)
        .map(positions)
        .unwrap_or_default();
    Some(Isochrone { time, border })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_xml(geometry: &str, summary: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <xls:XLS xmlns:xls="http://www.opengis.net/xls" xmlns:gml="http://www.opengis.net/gml" version="1.1">
              <xls:ResponseHeader/>
              <xls:Response requestID="1" version="1.1" numberOfResponses="1">
                <xls:DetermineRouteResponse>
                  <xls:RouteSummary>{summary}</xls:RouteSummary>
                  <xls:RouteGeometry>{geometry}</xls:RouteGeometry>
                </xls:DetermineRouteResponse>
              </xls:Response>
            </xls:XLS>"#
        )
    }

    const LINE: &str = r#"<gml:LineString srsName="EPSG:4326">
        <gml:pos>8.6753 49.4179</gml:pos>
        <gml:pos>8.6801 49.4150</gml:pos>
        <gml:pos>8.6937 49.4093</gml:pos>
      </gml:LineString>"#;

    const SUMMARY: &str = r#"<xls:TotalTime>PT6H38M52S</xls:TotalTime>
        <xls:TotalDistance uom="KM" value="84.0"/>"#;

    #[test]
    fn position_is_longitude_first() {
        let coordinate = parse_position("7.0457339 50.6495327").unwrap();
        assert!((coordinate.latitude - 50.649_532_7).abs() < 1e-9);
        assert!((coordinate.longitude - 7.045_733_9).abs() < 1e-9);
    }

    #[test]
    fn position_rejects_incomplete_text() {
        assert!(parse_position("7.0457339").is_none());
        assert!(parse_position("").is_none());
        assert!(parse_position("east north").is_none());
    }

    #[test]
    fn route_with_summary() {
        let path = decode_route(&route_xml(LINE, SUMMARY)).unwrap();
        assert_eq!(path.waypoints.len(), 3);
        assert_eq!(path.waypoints[0], Coordinate::new(49.4179, 8.6753));
        assert_eq!(path.waypoints[2], Coordinate::new(49.4093, 8.6937));
        assert_eq!(path.duration, Some(Duration::from_secs(23932)));
        assert_eq!(path.distance, Some(84_000.0));
    }

    #[test]
    fn route_with_single_waypoint() {
        let line = r#"<gml:LineString><gml:pos>8.6753 49.4179</gml:pos></gml:LineString>"#;
        let path = decode_route(&route_xml(line, SUMMARY)).unwrap();
        assert_eq!(path.waypoints.len(), 1);
    }

    #[test]
    fn route_summary_is_optional() {
        let path = decode_route(&route_xml(LINE, "")).unwrap();
        assert_eq!(path.waypoints.len(), 3);
        assert_eq!(path.duration, None);
        assert_eq!(path.distance, None);
    }

    #[test]
    fn route_with_unreadable_summary() {
        let summary = r#"<xls:TotalTime>soon</xls:TotalTime>
            <xls:TotalDistance uom="MI" value="52.0"/>"#;
        let path = decode_route(&route_xml(LINE, summary)).unwrap();
        assert_eq!(path.waypoints.len(), 3);
        assert_eq!(path.duration, None);
        assert_eq!(path.distance, None);
    }

    #[test]
    fn route_skips_unreadable_positions() {
        let line = r#"<gml:LineString>
            <gml:pos>garbage</gml:pos>
            <gml:pos>8.6937 49.4093</gml:pos>
          </gml:LineString>"#;
        let path = decode_route(&route_xml(line, SUMMARY)).unwrap();
        assert_eq!(path.waypoints, vec![Coordinate::new(49.4093, 8.6937)]);
    }

    #[test]
    fn route_without_geometry_is_not_found() {
        let result = decode_route(&route_xml("", SUMMARY));
        assert_eq!(result, Err(OpenLsError::RouteNotFound));
    }

    #[test]
    fn route_with_empty_line_is_not_found() {
        let result = decode_route(&route_xml("<gml:LineString/>", SUMMARY));
        assert_eq!(result, Err(OpenLsError::RouteNotFound));
    }

    #[test]
    fn route_error_document_is_not_found() {
        let xml = r#"<xls:XLS><xls:Response><xls:ErrorList/></xls:Response></xls:XLS>"#;
        assert_eq!(decode_route(xml), Err(OpenLsError::RouteNotFound));
    }

    #[test]
    fn route_malformed_xml_is_decode_error() {
        let result = decode_route("<xls:XLS><xls:Response></xls:XLS>");
        assert!(matches!(result, Err(OpenLsError::DecodeError(_))));
    }

    fn geocode_xml(addresses: &str) -> String {
        format!(
            r#"<xls:XLS xmlns:xls="http://www.opengis.net/xls" xmlns:gml="http://www.opengis.net/gml">
              <xls:Response>
                <xls:GeocodeResponse>
                  <xls:GeocodeResponseList numberOfGeocodedAddresses="0">{addresses}</xls:GeocodeResponseList>
                </xls:GeocodeResponse>
              </xls:Response>
            </xls:XLS>"#
        )
    }

    #[test]
    fn geocode_appends_building_number() {
        let xml = geocode_xml(
            r#"<xls:GeocodedAddress>
                 <gml:Point><gml:pos>8.6753 49.4179</gml:pos></gml:Point>
                 <xls:Address countryCode="DE">
                   <xls:StreetAddress>
                     <xls:Building number="12"/>
                     <xls:Street officialName="Berliner Straße"/>
                   </xls:StreetAddress>
                   <xls:Place type="Municipality">Heidelberg</xls:Place>
                 </xls:Address>
               </xls:GeocodedAddress>"#,
        );
        let locations = decode_geocoded_locations(&xml).unwrap();
        assert_eq!(locations.len(), 1);
        let address = &locations[0].address;
        assert_eq!(address.street, "Berliner Straße 12");
        assert_eq!(address.city, "Heidelberg");
        assert_eq!(address.iso_country_code, "DE");
        assert_eq!(address.postal_code, "");
        assert_eq!(address.state, "");
    }

    #[test]
    fn geocode_building_without_street_is_ignored() {
        let xml = geocode_xml(
            r#"<xls:GeocodedAddress>
                 <gml:Point><gml:pos>8.6753 49.4179</gml:pos></gml:Point>
                 <xls:Address>
                   <xls:StreetAddress><xls:Building number="12"/></xls:StreetAddress>
                 </xls:Address>
               </xls:GeocodedAddress>"#,
        );
        let locations = decode_geocoded_locations(&xml).unwrap();
        assert_eq!(locations[0].address.street, "");
    }

    #[test]
    fn geocode_without_address_uses_empty_address() {
        let xml = geocode_xml(
            r#"<xls:GeocodedAddress>
                 <gml:Point><gml:pos>8.6753 49.4179</gml:pos></gml:Point>
               </xls:GeocodedAddress>"#,
        );
        let locations = decode_geocoded_locations(&xml).unwrap();
        assert!(locations[0].address.is_empty());
    }

    #[test]
    fn geocode_skips_entries_without_position() {
        let xml = geocode_xml(
            r#"<xls:GeocodedAddress><xls:Address/></xls:GeocodedAddress>
               <xls:GeocodedAddress>
                 <gml:Point><gml:pos>8.6753 49.4179</gml:pos></gml:Point>
               </xls:GeocodedAddress>"#,
        );
        let locations = decode_geocoded_locations(&xml).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].coordinate, Coordinate::new(49.4179, 8.6753));
    }

    #[test]
    fn geocode_empty_list() {
        let locations = decode_geocoded_locations(&geocode_xml("")).unwrap();
        assert!(locations.is_empty());
    }

    #[test]
    fn geocode_missing_list_is_decode_error() {
        let xml = r#"<xls:XLS><xls:Response/></xls:XLS>"#;
        assert!(matches!(
            decode_geocoded_locations(xml),
            Err(OpenLsError::DecodeError(_))
        ));
    }

    fn accessibility_xml(geometry: &str) -> String {
        format!(
            r#"<aas:AAS xmlns:aas="http://www.geoinform.fh-mainz.de/aas" xmlns:gml="http://www.opengis.net/gml">
              <aas:Response>
                <aas:AccessibilityResponse>{geometry}</aas:AccessibilityResponse>
              </aas:Response>
            </aas:AAS>"#
        )
    }

    fn isochrone(time_attribute: &str) -> String {
        format!(
            r#"<aas:Isochrone {time_attribute}>
                 <aas:IsochroneGeometry>
                   <gml:Polygon><gml:exterior><gml:LinearRing>
                     <gml:pos>8.65 49.42</gml:pos>
                     <gml:pos>8.66 49.43</gml:pos>
                     <gml:pos>8.67 49.42</gml:pos>
                   </gml:LinearRing></gml:exterior></gml:Polygon>
                 </aas:IsochroneGeometry>
               </aas:Isochrone>"#
        )
    }

    #[test]
    fn accessibility_isochrones_in_order() {
        let geometry = format!(
            "<aas:AccessibilityGeometry>{}{}</aas:AccessibilityGeometry>",
            isochrone(r#"time="300.0""#),
            isochrone(r#"time="600""#)
        );
        let origin = Coordinate::new(49.43, 8.66);
        let area = decode_accessible_area(&accessibility_xml(&geometry), origin).unwrap();
        assert_eq!(area.origin, origin);
        assert_eq!(area.isochrones.len(), 2);
        assert_eq!(area.isochrones[0].time, Duration::from_secs(300));
        assert_eq!(area.isochrones[1].time, Duration::from_secs(600));
        assert_eq!(area.isochrones[0].border.len(), 3);
        assert_eq!(area.isochrones[0].border[1], Coordinate::new(49.43, 8.66));
    }

    #[test]
    fn accessibility_drops_isochrones_without_time() {
        let geometry = format!(
            "<aas:AccessibilityGeometry>{}{}{}</aas:AccessibilityGeometry>",
            isochrone(""),
            isochrone(r#"time="soon""#),
            isochrone(r#"time="120""#)
        );
        let area =
            decode_accessible_area(&accessibility_xml(&geometry), Coordinate::new(0.0, 0.0))
                .unwrap();
        assert_eq!(area.isochrones.len(), 1);
        assert_eq!(area.isochrones[0].time, Duration::from_secs(120));
    }

    #[test]
    fn accessibility_drops_negative_time() {
        let geometry = format!(
            "<aas:AccessibilityGeometry>{}</aas:AccessibilityGeometry>",
            isochrone(r#"time="-60""#)
        );
        let area =
            decode_accessible_area(&accessibility_xml(&geometry), Coordinate::new(0.0, 0.0))
                .unwrap();
        assert!(area.isochrones.is_empty());
    }

    #[test]
    fn accessibility_without_geometry_is_empty() {
        let area = decode_accessible_area(&accessibility_xml(""), Coordinate::new(0.0, 0.0))
            .unwrap();
        assert!(area.isochrones.is_empty());
    }

    #[test]
    fn accessibility_missing_response_is_decode_error() {
        let result = decode_accessible_area("<aas:AAS/>", Coordinate::new(0.0, 0.0));
        assert!(matches!(result, Err(OpenLsError::DecodeError(_))));
    }
}
