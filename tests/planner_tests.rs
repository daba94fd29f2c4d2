//! End-to-end route computation with in-process collaborators.

mod fixtures;

use route_mapper::planner::{PlaceQuery, PlannerError, RoutePlanner};
use route_mapper::polyline::{self, PRECISION_5};
use route_mapper::resolver::ResolveError;
use route_mapper::saved_routes::{InMemoryRouteRepository, NewRoute, StoredCoordinates};
use route_mapper::search_stats::InMemoryStore;
use route_mapper::traits::{DEFAULT_AUTOCOMPLETE_SIZE, RouteRepository};

use fixtures::responses::*;
use fixtures::swiss_locations::*;

type TestPlanner = RoutePlanner<StubDirections, StubGeocoder, InMemoryRouteRepository, InMemoryStore>;

fn planner(directions: StubDirections) -> TestPlanner {
    RoutePlanner::new(
        directions,
        StubGeocoder::swiss(),
        InMemoryRouteRepository::new(),
        InMemoryStore::new(),
    )
}

fn stored(encoded: Option<&str>) -> NewRoute {
    NewRoute {
        start_text: ZURICH_HB.name.to_string(),
        end_text: BERN_BAHNHOF.name.to_string(),
        start_coordinates: StoredCoordinates::from_lat_lng(ZURICH_HB.coords()),
        end_coordinates: StoredCoordinates::from_lat_lng(BERN_BAHNHOF.coords()),
        distance_meters: None,
        duration_seconds: None,
        geometry_encoded: encoded.map(str::to_string),
        profile: "driving-car".to_string(),
    }
}

#[test]
fn computes_saves_and_counts_route() {
    let mut planner = planner(StubDirections::answering(ors_json_response(REFERENCE_ENCODED)));
    let start = PlaceQuery::at(ZURICH_HB.name, ZURICH_HB.coords());
    let end = PlaceQuery::at(BERN_BAHNHOF.name, BERN_BAHNHOF.coords());

    let planned = planner.compute(&start, &end).unwrap();
    assert_eq!(planned.route.polyline.len(), 3);
    assert_eq!(planned.start, ZURICH_HB.coords());

    let saved = planned.saved.expect("route saved");
    assert_eq!(saved.route.geometry_encoded.as_deref(), Some(REFERENCE_ENCODED));
    assert_eq!(saved.route.distance_meters, Some(124543.6));
    assert_eq!(saved.route.start_coordinates.longitude, ZURICH_HB.lng);
    assert_eq!(saved.route.profile, "driving-car");

    assert_eq!(
        planner.top_searches(),
        vec![("Zürich HB, Schweiz → Bern Bahnhof, Schweiz".to_string(), 1)]
    );
}

#[test]
fn geocodes_places_without_position() {
    let directions = StubDirections::answering(ors_json_response(REFERENCE_ENCODED));
    let mut planner = planner(directions);

    planner
        .compute(&PlaceQuery::text(" Zürich HB, Schweiz "), &PlaceQuery::text("Bern Bahnhof, Schweiz"))
        .unwrap();

    let saved = planner.repository().list().unwrap();
    assert_eq!(saved[0].route.start_text, "Zürich HB, Schweiz");
    assert_eq!(saved[0].route.end_coordinates.lat_lng(), BERN_BAHNHOF.coords());
}

#[test]
fn repeated_searches_are_counted() {
    let mut planner = planner(StubDirections::answering(ors_json_response(REFERENCE_ENCODED)));

    planner
        .compute(&PlaceQuery::text(ZURICH_CENTER.name), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap();
    planner
        .compute(&PlaceQuery::text(ZURICH_CENTER.name), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap();

    assert_eq!(planner.top_searches()[0].1, 2);
    assert_eq!(planner.repository().list().unwrap().len(), 2);
}

#[test]
fn requests_directions_between_geocoded_points() {
    let directions = StubDirections::answering(ors_json_response(REFERENCE_ENCODED));
    let requests = directions.requests.clone();
    let mut planner = planner(directions);

    planner
        .compute(&PlaceQuery::text(ZURICH_CENTER.name), &PlaceQuery::at("Bern", BERN_BAHNHOF.coords()))
        .unwrap();

    assert_eq!(
        requests.borrow().as_slice(),
        &[(ZURICH_CENTER.coords(), BERN_BAHNHOF.coords())]
    );
}

#[test]
fn unknown_place_stops_before_directions() {
    let directions = StubDirections::answering(ors_json_response(REFERENCE_ENCODED));
    let requests = directions.requests.clone();
    let mut planner = planner(directions);
    let err = planner
        .compute(&PlaceQuery::text("Atlantis"), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap_err();

    assert!(matches!(err, PlannerError::UnknownPlace(ref text) if text == "Atlantis"));
    assert!(requests.borrow().is_empty());
    assert!(planner.top_searches().is_empty());
}

#[test]
fn no_route_is_reported_and_not_saved() {
    let mut planner = planner(StubDirections::answering(no_route_response()));
    let err = planner
        .compute(&PlaceQuery::text(ZURICH_HB.name), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap_err();

    assert!(matches!(err, PlannerError::Route(ResolveError::NoRouteFound)));
    assert!(planner.repository().list().unwrap().is_empty());
    assert!(planner.top_searches().is_empty());
}

#[test]
fn directions_failure_is_reported() {
    let mut planner = planner(StubDirections::failing(503));
    let err = planner
        .compute(&PlaceQuery::text(ZURICH_HB.name), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap_err();
    assert!(matches!(err, PlannerError::Directions(_)));
}

#[test]
fn structured_geometry_is_saved_encoded() {
    let mut planner = planner(StubDirections::answering(osrm_geojson_response(ZURICH_TO_BERN)));
    let planned = planner
        .compute(&PlaceQuery::text(ZURICH_HB.name), &PlaceQuery::text(BERN_BAHNHOF.name))
        .unwrap();

    let encoded = planned.saved.unwrap().route.geometry_encoded.unwrap();
    let decoded = polyline::decode(&encoded, PRECISION_5).unwrap();
    assert_eq!(decoded.len(), ZURICH_TO_BERN.len());
}

#[test]
fn history_decodes_each_saved_route() {
    let planner = planner(StubDirections::answering(no_route_response()));
    let repo = planner.repository();
    repo.create(&stored(Some(REFERENCE_ENCODED))).unwrap();
    repo.create(&stored(Some(ZURICH_TO_BERN_POLYLINE6))).unwrap();
    repo.create(&stored(None)).unwrap();
    repo.create(&stored(Some("_p~iF~ps|"))).unwrap();

    let history = planner.history().unwrap();
    assert_eq!(history.len(), 4);

    let reference = history[0].geometry.clone().unwrap().unwrap();
    assert_eq!(reference.len(), 3);

    let swiss = history[1].geometry.clone().unwrap().unwrap();
    assert!((swiss.points()[2].0 - BERN_BAHNHOF.lat).abs() < 1e-9);

    assert!(history[2].geometry.is_none());
    assert_eq!(history[3].geometry, Some(Err(ResolveError::UnreadableGeometry)));
}

#[test]
fn delete_removes_saved_route() {
    let planner = planner(StubDirections::answering(no_route_response()));
    let saved = planner.repository().create(&stored(None)).unwrap();

    planner.delete(&saved.identifier).unwrap();
    assert!(planner.history().unwrap().is_empty());
    assert!(matches!(planner.delete(&saved.identifier), Err(PlannerError::Store(_))));
}

#[test]
fn suggestions_come_from_geocoder() {
    let planner = planner(StubDirections::answering(no_route_response()));
    let suggestions = planner.suggestions("Zürich").unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(PlaceQuery::from(suggestions[1].clone()), PlaceQuery::at(ZURICH_HB.name, ZURICH_HB.coords()));
}

#[test]
fn suggestions_request_default_size() {
    let geocoder = StubGeocoder::swiss();
    let sizes = geocoder.autocomplete_sizes.clone();
    let planner = RoutePlanner::new(
        StubDirections::answering(no_route_response()),
        geocoder,
        InMemoryRouteRepository::new(),
        InMemoryStore::new(),
    );

    planner.suggestions("Bern").unwrap();
    assert_eq!(*sizes.borrow(), vec![DEFAULT_AUTOCOMPLETE_SIZE]);
}
