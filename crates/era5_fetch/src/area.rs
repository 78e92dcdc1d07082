use serde::Deserialize;

/// The spatial extent of each request, in degrees.
///
/// Written in config files as `[north, west, south, east]`, the order the CDS
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "[f64; 4]")]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(north: f64, west: f64, south: f64, east: f64) -> Result<Self, AreaError> {
        for (name, value) in [("north", north), ("south", south)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(AreaError::Latitude { name, value });
            }
        }
        for (name, value) in [("west", west), ("east", east)] {
            if !(-180.0..=360.0).contains(&value) {
                return Err(AreaError::Longitude { name, value });
            }
        }
        if north < south {
            return Err(AreaError::NorthBelowSouth { north, south });
        }
        Ok(Self {
            north,
            west,
            south,
            east,
        })
    }

    pub fn to_area(&self) -> cds_client::Area {
        cds_client::Area([self.north, self.west, self.south, self.east])
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = AreaError;

    fn try_from([north, west, south, east]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(north, west, south, east)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, derive_more::Display)]
pub enum AreaError {
    // NaN fails the range checks too, so it ends up here.
    #[display("{name} latitude {value} is outside [-90, 90]")]
    Latitude { name: &'static str, value: f64 },
    #[display("{name} longitude {value} is outside [-180, 360]")]
    Longitude { name: &'static str, value: f64 },
    #[display("north ({north}) is south of south ({south})")]
    NorthBelowSouth { north: f64, south: f64 },
}
