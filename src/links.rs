//! Deep links to external navigation services, pure string builders.

/// Google Maps directions to the venue.
pub fn maps_directions(lat: f64, long: f64) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        lat, long
    )
}

/// Uber deep link with the venue preset as drop off.
pub fn uber_dropoff(lat: f64, long: f64) -> String {
    format!(
        "https://m.uber.com/ul/?action=setPickup&dropoff[latitude]={}&dropoff[longitude]={}",
        lat, long
    )
}
