use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

use super::{Coordinate, CoordinateSeq, Envelope};

/// A linear path of 2 or more coordinates (or empty).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    coords: CoordinateSeq,
}

impl LineString {
    /// Construct, rejecting a 1-point sequence.
    pub fn new(coords: CoordinateSeq) -> Result<Self, GeometryError> {
        if coords.len() == 1 {
            return Err(GeometryError::LineTooFewPoints(coords.len()));
        }
        Ok(Self { coords })
    }

    /// Construct without validation, for transforms that preserve the
    /// point-count invariant.
    pub(crate) fn raw(coords: CoordinateSeq) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &CoordinateSeq {
        &self.coords
    }

    pub fn into_coords(self) -> CoordinateSeq {
        self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.coords.is_closed()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }
}

/// A closed, simple linear path: empty, or >= 4 coordinates with
/// first == last.  Closure and length are enforced at construction;
/// non-self-intersection is a validity property checked separately.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    coords: CoordinateSeq,
}

impl LinearRing {
    pub fn new(coords: CoordinateSeq) -> Result<Self, GeometryError> {
        if !coords.is_empty() {
            if !coords.is_closed() {
                return Err(GeometryError::RingNotClosed);
            }
            if coords.len() < 4 {
                return Err(GeometryError::RingTooFewPoints(coords.len()));
            }
        }
        Ok(Self { coords })
    }

    pub fn empty() -> Self {
        Self { coords: CoordinateSeq::new() }
    }

    /// Construct without validation, for transforms that preserve closure.
    pub(crate) fn raw(coords: CoordinateSeq) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &CoordinateSeq {
        &self.coords
    }

    pub fn into_coords(self) -> CoordinateSeq {
        self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Signed area: positive for counter-clockwise orientation.
    pub fn signed_area(&self) -> f64 {
        signed_area(self.coords.as_slice())
    }
}

/// Signed shoelace area of a closed coordinate chain; positive for CCW.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for w in ring.windows(2) {
        sum += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    sum / 2.0
}

/// A shell ring with zero or more hole rings.  Hole containment and
/// orientation are validity properties, not construction invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub shell: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { shell, holes }
    }

    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Unsigned area: |shell| minus the sum of |holes|.
    pub fn area(&self) -> f64 {
        let shell = self.shell.signed_area().abs();
        let holes: f64 = self.holes.iter().map(|h| h.signed_area().abs()).sum();
        shell - holes
    }
}

/// The closed set of geometry variants.  Traversal is by pattern match;
/// there is no visitor hierarchy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coordinate),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Collection(_) => "GeometryCollection",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(l) => l.is_empty(),
            Geometry::LinearRing(r) => r.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::MultiLineString(ls) => ls.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(ps) => ps.iter().all(Polygon::is_empty),
            Geometry::Collection(gs) => gs.iter().all(Geometry::is_empty),
        }
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        self.for_each_coord(&mut |c| env.expand_to_include(c));
        env
    }

    /// Visit every coordinate of this geometry, recursing into collections.
    pub fn for_each_coord(&self, f: &mut impl FnMut(Coordinate)) {
        match self {
            Geometry::Point(c) => f(*c),
            Geometry::LineString(l) => l.coords().iter().for_each(|&c| f(c)),
            Geometry::LinearRing(r) => r.coords().iter().for_each(|&c| f(c)),
            Geometry::Polygon(p) => {
                p.rings().for_each(|r| r.coords().iter().for_each(|&c| f(c)))
            }
            Geometry::MultiPoint(pts) => pts.iter().for_each(|&c| f(c)),
            Geometry::MultiLineString(ls) => {
                ls.iter().for_each(|l| l.coords().iter().for_each(|&c| f(c)))
            }
            Geometry::MultiPolygon(ps) => ps
                .iter()
                .for_each(|p| p.rings().for_each(|r| r.coords().iter().for_each(|&c| f(c)))),
            Geometry::Collection(gs) => gs.iter().for_each(|g| g.for_each_coord(f)),
        }
    }

    /// Total area of all polygonal components.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiPolygon(ps) => ps.iter().map(Polygon::area).sum(),
            Geometry::Collection(gs) => gs.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }

    /// All polygonal components, recursing into collections.
    pub fn polygons(&self) -> Vec<&Polygon> {
        let mut out = Vec::new();
        fn collect<'a>(g: &'a Geometry, out: &mut Vec<&'a Polygon>) {
            match g {
                Geometry::Polygon(p) => out.push(p),
                Geometry::MultiPolygon(ps) => out.extend(ps.iter()),
                Geometry::Collection(gs) => gs.iter().for_each(|g| collect(g, out)),
                _ => {}
            }
        }
        collect(self, &mut out);
        out
    }

    /// All linear components (LineStrings and rings), as coordinate slices.
    pub fn lines(&self) -> Vec<&CoordinateSeq> {
        let mut out = Vec::new();
        fn collect<'a>(g: &'a Geometry, out: &mut Vec<&'a CoordinateSeq>) {
            match g {
                Geometry::LineString(l) if !l.is_empty() => out.push(l.coords()),
                Geometry::LinearRing(r) if !r.is_empty() => out.push(r.coords()),
                Geometry::Polygon(p) => {
                    p.rings().filter(|r| !r.is_empty()).for_each(|r| out.push(r.coords()))
                }
                Geometry::MultiLineString(ls) => {
                    ls.iter().filter(|l| !l.is_empty()).for_each(|l| out.push(l.coords()))
                }
                Geometry::MultiPolygon(ps) => ps.iter().for_each(|p| {
                    p.rings().filter(|r| !r.is_empty()).for_each(|r| out.push(r.coords()))
                }),
                Geometry::Collection(gs) => gs.iter().for_each(|g| collect(g, out)),
                _ => {}
            }
        }
        collect(self, &mut out);
        out
    }
}
