use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::schema::{LATITUDE, LONGITUDE};

pub const DEFAULT_MAP_ZOOM: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single accident location drawn on the hotspot map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hotspot {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<MapCenter>,
    pub zoom: u8,
    pub hotspots: Vec<Hotspot>,
}

fn coordinate(df: &DataFrame, name: &'static str) -> Result<Float64Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|err| DashboardError::InvalidCoordinate {
            column: name,
            reason: err.to_string(),
        })?;
    Ok(series.f64()?.clone())
}

/// Mean latitude and longitude, ignoring empty cells. `None` when either column has no values.
pub fn map_center(df: &DataFrame) -> Result<Option<MapCenter>> {
    let latitude = coordinate(df, LATITUDE)?;
    let longitude = coordinate(df, LONGITUDE)?;
    Ok(match (latitude.mean(), longitude.mean()) {
        (Some(latitude), Some(longitude)) => Some(MapCenter {
            latitude,
            longitude,
        }),
        _ => None,
    })
}

/// One point per row that has both coordinates, in row order.
pub fn hotspots(df: &DataFrame) -> Result<Vec<Hotspot>> {
    let latitude = coordinate(df, LATITUDE)?;
    let longitude = coordinate(df, LONGITUDE)?;

    let points: Vec<Hotspot> = latitude
        .into_iter()
        .zip(longitude.into_iter())
        .filter_map(|pair| match pair {
            (Some(latitude), Some(longitude)) => Some(Hotspot {
                latitude,
                longitude,
            }),
            _ => None,
        })
        .collect();

    let skipped = df.height() - points.len();
    if skipped > 0 {
        debug!(skipped, "rows without coordinates left off the map");
    }
    Ok(points)
}

pub fn map_view(df: &DataFrame, zoom: u8) -> Result<MapView> {
    Ok(MapView {
        center: map_center(df)?,
        zoom,
        hotspots: hotspots(df)?,
    })
}
