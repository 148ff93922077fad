//! The [`Region`] polygon and its derived geometric quantities.

use geo::{
    BoundingRect, Centroid, Contains, Distance, GeodesicArea, Haversine, LineString, Point,
    Polygon, Rect,
};

use crate::error::GeoError;

/// A simple polygon in geographic coordinates (longitude/latitude).
///
/// Construction validates the ring shape only. A valid region may still
/// have zero area; density features computed from such a region resolve
/// to 0 via guarded division rather than a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    polygon: Polygon<f64>,
}

impl Region {
    /// Build a rectangular region from bounding coordinates in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidBounds`] unless `north > south` and
    /// `east > west`.
    pub fn from_bounds(north: f64, south: f64, east: f64, west: f64) -> Result<Self, GeoError> {
        if !(north > south && east > west)
            || !north.is_finite()
            || !south.is_finite()
            || !east.is_finite()
            || !west.is_finite()
        {
            return Err(GeoError::InvalidBounds {
                north,
                south,
                east,
                west,
            });
        }
        // Counter-clockwise winding; a clockwise ring reads as the
        // Earth-complement polygon under the geodesic area convention.
        let exterior = LineString::from(vec![
            (west, south),
            (east, south),
            (east, north),
            (west, north),
            (west, south),
        ]);
        Ok(Self {
            polygon: Polygon::new(exterior, vec![]),
        })
    }

    /// Wrap an existing polygon, rejecting rings too short to close.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::DegenerateRing`] when the exterior ring has
    /// fewer than four positions.
    pub fn from_polygon(polygon: Polygon<f64>) -> Result<Self, GeoError> {
        let ring_len = polygon.exterior().0.len();
        if ring_len < 4 {
            return Err(GeoError::DegenerateRing(ring_len));
        }
        Ok(Self { polygon })
    }

    /// Build a region from a GeoJSON geometry (must be a `Polygon`).
    ///
    /// Positions are `[lon, lat]` per the GeoJSON spec. Interior rings
    /// (holes) are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnsupportedGeometry`] for non-polygon
    /// geometries, [`GeoError::MalformedPosition`] for positions missing
    /// a coordinate, and [`GeoError::DegenerateRing`] for rings with
    /// fewer than four positions.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self, GeoError> {
        let geojson::Value::Polygon(rings) = &geometry.value else {
            return Err(GeoError::UnsupportedGeometry(
                geometry.value.type_name().to_owned(),
            ));
        };
        let Some((exterior, holes)) = rings.split_first() else {
            return Err(GeoError::DegenerateRing(0));
        };
        let exterior = ring_to_line_string(exterior)?;
        let holes = holes
            .iter()
            .map(|ring| ring_to_line_string(ring))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_polygon(Polygon::new(exterior, holes))
    }

    /// Borrow the underlying polygon.
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Geodesic (ellipsoidal) area of the region in km².
    ///
    /// Uses the signed area's magnitude, so clockwise-wound rings (legal
    /// in caller-supplied GeoJSON) measure the enclosed polygon rather
    /// than its complement covering the rest of the globe. Degenerate
    /// polygons yield 0; callers guard their divisions.
    pub fn area_km2(&self) -> f64 {
        self.polygon.geodesic_area_signed().abs() / 1.0e6
    }

    /// Centroid of the region, if the polygon is non-empty.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.polygon.centroid()
    }

    /// Axis-aligned bounding rectangle in degrees.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }

    /// Latitude span (north minus south) of the bounding box, degrees.
    ///
    /// This feeds the elevation proxy, which deliberately couples
    /// "elevation" to the region's latitude extent.
    pub fn lat_span(&self) -> f64 {
        self.bounding_rect().map_or(0.0, |rect| rect.height())
    }

    /// Whether the given point lies strictly inside the region.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.polygon.contains(point)
    }
}

/// Haversine (great-circle) distance between two points in kilometers.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b) / 1000.0
}

fn ring_to_line_string(ring: &[Vec<f64>]) -> Result<LineString<f64>, GeoError> {
    let coords = ring
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(GeoError::MalformedPosition),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::from(coords))
}
