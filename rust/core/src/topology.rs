// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connector topology classification
//!
//! A connector's `connectorType` is a 6-bit mask of the axis directions it
//! has sockets on:
//!
//! | bit | direction |
//! |-----|-----------|
//! | 0   | +X        |
//! | 1   | -X        |
//! | 2   | +Y        |
//! | 3   | -Y        |
//! | 4   | +Z        |
//! | 5   | -Z        |

use nalgebra::Vector3;

const X_AXIS: u32 = 0x03;
const Y_AXIS: u32 = 0x0C;
const Z_AXIS: u32 = 0x30;
const ALL_DIRECTIONS: u32 = 0x3F;

/// Semantic connector shape derived from the direction mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorTopology {
    Invalid,
    Straight,
    LConnector,
    TConnector,
    CornerConnector,
    CrossConnector,
    FourWayConnector,
    FiveWayConnector,
    HubConnector,
}

impl ConnectorTopology {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorTopology::Invalid => "INVALID",
            ConnectorTopology::Straight => "STRAIGHT",
            ConnectorTopology::LConnector => "L_CONNECTOR",
            ConnectorTopology::TConnector => "T_CONNECTOR",
            ConnectorTopology::CornerConnector => "CORNER_CONNECTOR",
            ConnectorTopology::CrossConnector => "CROSS_CONNECTOR",
            ConnectorTopology::FourWayConnector => "FOUR_WAY_CONNECTOR",
            ConnectorTopology::FiveWayConnector => "FIVE_WAY_CONNECTOR",
            ConnectorTopology::HubConnector => "HUB_CONNECTOR",
        }
    }
}

impl std::fmt::Display for ConnectorTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a connector direction mask
///
/// Bits above bit 5 carry no direction and are ignored.
pub fn classify_connector(mask: u32) -> ConnectorTopology {
    let mask = mask & ALL_DIRECTIONS;
    let axis_counts = [
        (mask & X_AXIS).count_ones(),
        (mask & Y_AXIS).count_ones(),
        (mask & Z_AXIS).count_ones(),
    ];

    match mask.count_ones() {
        0 | 1 => ConnectorTopology::Invalid,
        2 => {
            if axis_counts.contains(&2) {
                ConnectorTopology::Straight
            } else {
                ConnectorTopology::LConnector
            }
        }
        3 => {
            if axis_counts.iter().all(|&n| n == 1) {
                ConnectorTopology::CornerConnector
            } else {
                ConnectorTopology::TConnector
            }
        }
        4 => {
            let empty_axes = axis_counts.iter().filter(|&&n| n == 0).count();
            let populated_axes = axis_counts.iter().filter(|&&n| n >= 1).count();
            if empty_axes == 1 && populated_axes == 2 {
                ConnectorTopology::CrossConnector
            } else {
                ConnectorTopology::FourWayConnector
            }
        }
        5 => ConnectorTopology::FiveWayConnector,
        6 => ConnectorTopology::HubConnector,
        _ => ConnectorTopology::Invalid,
    }
}

/// One of the six socket directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorDirection {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl ConnectorDirection {
    pub const ALL: [ConnectorDirection; 6] = [
        ConnectorDirection::PosX,
        ConnectorDirection::NegX,
        ConnectorDirection::PosY,
        ConnectorDirection::NegY,
        ConnectorDirection::PosZ,
        ConnectorDirection::NegZ,
    ];

    /// Bit of this direction in the connector mask
    #[inline]
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Unit vector in the connector's local frame
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            ConnectorDirection::PosX => Vector3::x(),
            ConnectorDirection::NegX => -Vector3::x(),
            ConnectorDirection::PosY => Vector3::y(),
            ConnectorDirection::NegY => -Vector3::y(),
            ConnectorDirection::PosZ => Vector3::z(),
            ConnectorDirection::NegZ => -Vector3::z(),
        }
    }
}

/// Directions set in `mask`, in bit order
pub fn directions(mask: u32) -> impl Iterator<Item = ConnectorDirection> {
    ConnectorDirection::ALL
        .into_iter()
        .filter(move |d| mask & d.bit() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid() {
        assert_eq!(classify_connector(0), ConnectorTopology::Invalid);
        assert_eq!(classify_connector(0b000001), ConnectorTopology::Invalid);
        assert_eq!(classify_connector(0b100000), ConnectorTopology::Invalid);
    }

    #[test]
    fn test_two_sockets() {
        assert_eq!(classify_connector(0b000011), ConnectorTopology::Straight);
        assert_eq!(classify_connector(0b001100), ConnectorTopology::Straight);
        assert_eq!(classify_connector(0b110000), ConnectorTopology::Straight);
        assert_eq!(classify_connector(0b000101), ConnectorTopology::LConnector);
        assert_eq!(classify_connector(0b100010), ConnectorTopology::LConnector);
    }

    #[test]
    fn test_three_sockets() {
        assert_eq!(classify_connector(0b010101), ConnectorTopology::CornerConnector);
        assert_eq!(classify_connector(0b101010), ConnectorTopology::CornerConnector);
        assert_eq!(classify_connector(0b000111), ConnectorTopology::TConnector);
        assert_eq!(classify_connector(0b110100), ConnectorTopology::TConnector);
    }

    #[test]
    fn test_four_sockets() {
        assert_eq!(classify_connector(0b111100), ConnectorTopology::CrossConnector);
        assert_eq!(classify_connector(0b001111), ConnectorTopology::CrossConnector);
        assert_eq!(classify_connector(0b010111), ConnectorTopology::FourWayConnector);
    }

    #[test]
    fn test_five_and_six() {
        assert_eq!(classify_connector(0b011111), ConnectorTopology::FiveWayConnector);
        assert_eq!(classify_connector(0b111111), ConnectorTopology::HubConnector);
    }

    #[test]
    fn test_high_bits_ignored() {
        assert_eq!(classify_connector(0b1_000011), ConnectorTopology::Straight);
        assert_eq!(classify_connector(0xFFC0), ConnectorTopology::Invalid);
    }

    #[test]
    fn test_directions() {
        let dirs: Vec<_> = directions(0b100101).collect();
        assert_eq!(
            dirs,
            vec![
                ConnectorDirection::PosX,
                ConnectorDirection::PosY,
                ConnectorDirection::NegZ
            ]
        );
        assert_eq!(ConnectorDirection::NegY.bit(), 0b001000);
        assert_eq!(ConnectorDirection::NegZ.unit_vector(), -Vector3::z());
    }
}
