//! Node-tag layout of the serialized chars trie.
//!
//! A trie is a flat `[u16]`. Every node starts with a *lead unit* whose value
//! range says what kind of node it is:
//!
//! ```text
//! 0x0000..=0x002f  branch node; length-1 in the lead (0 = length follows)
//! 0x0030..=0x003f  linear-match node; match 1..=16 units, then continue
//! 0x0040..=0x7fff  intermediate value; low 6 bits hold the following node type
//! 0x8000..=0xffff  final value; bits 14..0 start the value encoding
//! ```
//!
//! Values use 1, 2 or 3 units depending on magnitude. Negative values always
//! take the 3-unit form. Branch nodes with more than
//! [`MAX_BRANCH_LINEAR_SUB_NODE_LENGTH`] children are split into a binary
//! search over comparison units with jump deltas (1..=3 units each).
//!
//! The layout is unit-for-unit compatible with ICU's `CharsTrie`.

pub(crate) const MAX_BRANCH_LINEAR_SUB_NODE_LENGTH: usize = 5;

/// 0030..003f: Linear-match node, match 1..16 units and continue reading the next node.
pub(crate) const MIN_LINEAR_MATCH: u16 = 0x30;
pub(crate) const MAX_LINEAR_MATCH_LENGTH: usize = 0x10;

/// 0040..ffff: Value lead unit for a final value or an intermediate value on a node.
pub(crate) const MIN_VALUE_LEAD: u16 = MIN_LINEAR_MATCH + MAX_LINEAR_MATCH_LENGTH as u16;
pub(crate) const NODE_TYPE_MASK: u16 = MIN_VALUE_LEAD - 1;

pub(crate) const VALUE_IS_FINAL: u16 = 0x8000;

// Final values (bit 15 set) and list-branch values.
pub(crate) const MAX_ONE_UNIT_VALUE: i32 = 0x3fff;
pub(crate) const MIN_TWO_UNIT_VALUE_LEAD: u16 = (MAX_ONE_UNIT_VALUE + 1) as u16;
pub(crate) const THREE_UNIT_VALUE_LEAD: u16 = 0x7fff;
pub(crate) const MAX_TWO_UNIT_VALUE: i32 = (((THREE_UNIT_VALUE_LEAD - MIN_TWO_UNIT_VALUE_LEAD) as i32) << 16) - 1;

// Intermediate values sharing their lead unit with a node type.
pub(crate) const MAX_ONE_UNIT_NODE_VALUE: i32 = 0xff;
pub(crate) const MIN_TWO_UNIT_NODE_VALUE_LEAD: u16 = MIN_VALUE_LEAD + (((MAX_ONE_UNIT_NODE_VALUE + 1) << 6) as u16);
pub(crate) const THREE_UNIT_NODE_VALUE_LEAD: u16 = 0x7fc0;
pub(crate) const MAX_TWO_UNIT_NODE_VALUE: i32 =
    (((THREE_UNIT_NODE_VALUE_LEAD - MIN_TWO_UNIT_NODE_VALUE_LEAD) as i32) << 10) - 1;

// Jump deltas.
pub(crate) const MAX_ONE_UNIT_DELTA: usize = 0xfbff;
pub(crate) const MIN_TWO_UNIT_DELTA_LEAD: u16 = (MAX_ONE_UNIT_DELTA + 1) as u16;
pub(crate) const THREE_UNIT_DELTA_LEAD: u16 = 0xffff;
pub(crate) const MAX_TWO_UNIT_DELTA: usize = (((THREE_UNIT_DELTA_LEAD - MIN_TWO_UNIT_DELTA_LEAD) as usize) << 16) - 1;

/// Reads a final or list-branch value whose lead unit (with bit 15 masked off)
/// has already been consumed; `pos` points after the lead.
pub(crate) fn read_value(units: &[u16], pos: usize, lead: u16) -> i32 {
    if lead < MIN_TWO_UNIT_VALUE_LEAD {
        lead as i32
    } else if lead < THREE_UNIT_VALUE_LEAD {
        (((lead - MIN_TWO_UNIT_VALUE_LEAD) as i32) << 16) | units[pos] as i32
    } else {
        ((units[pos] as i32) << 16) | units[pos + 1] as i32
    }
}

pub(crate) fn skip_value(pos: usize, lead: u16) -> usize {
    if lead >= MIN_TWO_UNIT_VALUE_LEAD {
        if lead < THREE_UNIT_VALUE_LEAD { pos + 1 } else { pos + 2 }
    } else {
        pos
    }
}

/// Skips a whole value, lead unit included.
pub(crate) fn skip_value_at(units: &[u16], pos: usize) -> usize {
    let lead = units[pos];
    skip_value(pos + 1, lead & 0x7fff)
}

/// Reads an intermediate value stored in a node lead unit.
pub(crate) fn read_node_value(units: &[u16], pos: usize, lead: u16) -> i32 {
    debug_assert!(MIN_VALUE_LEAD <= lead && lead < VALUE_IS_FINAL);
    if lead < MIN_TWO_UNIT_NODE_VALUE_LEAD {
        ((lead >> 6) as i32) - 1
    } else if lead < THREE_UNIT_NODE_VALUE_LEAD {
        ((((lead & 0x7fc0) - MIN_TWO_UNIT_NODE_VALUE_LEAD) as i32) << 10) | units[pos] as i32
    } else {
        ((units[pos] as i32) << 16) | units[pos + 1] as i32
    }
}

pub(crate) fn skip_node_value(pos: usize, lead: u16) -> usize {
    debug_assert!(MIN_VALUE_LEAD <= lead && lead < VALUE_IS_FINAL);
    if lead >= MIN_TWO_UNIT_NODE_VALUE_LEAD {
        if lead < THREE_UNIT_NODE_VALUE_LEAD { pos + 1 } else { pos + 2 }
    } else {
        pos
    }
}

/// Follows a jump delta starting at `pos`; returns the target position.
pub(crate) fn jump_by_delta(units: &[u16], pos: usize) -> usize {
    let mut pos = pos;
    let lead = units[pos];
    pos += 1;
    let delta = if lead < MIN_TWO_UNIT_DELTA_LEAD {
        lead as usize
    } else if lead == THREE_UNIT_DELTA_LEAD {
        let delta = ((units[pos] as usize) << 16) | units[pos + 1] as usize;
        pos += 2;
        delta
    } else {
        let delta = (((lead - MIN_TWO_UNIT_DELTA_LEAD) as usize) << 16) | units[pos] as usize;
        pos += 1;
        delta
    };
    pos + delta
}

pub(crate) fn skip_delta(units: &[u16], pos: usize) -> usize {
    let lead = units[pos];
    if lead >= MIN_TWO_UNIT_DELTA_LEAD {
        if lead == THREE_UNIT_DELTA_LEAD { pos + 3 } else { pos + 2 }
    } else {
        pos + 1
    }
}

/// Encodes a final or list-branch value, lead unit first.
pub(crate) fn encode_value(value: i32, is_final: bool, out: &mut [u16; 3]) -> usize {
    let final_bit = if is_final { VALUE_IS_FINAL } else { 0 };
    if (0..=MAX_ONE_UNIT_VALUE).contains(&value) {
        out[0] = value as u16 | final_bit;
        return 1;
    }
    let len = if !(0..=MAX_TWO_UNIT_VALUE).contains(&value) {
        out[0] = THREE_UNIT_VALUE_LEAD;
        out[1] = ((value as u32) >> 16) as u16;
        out[2] = value as u16;
        3
    } else {
        out[0] = MIN_TWO_UNIT_VALUE_LEAD + (value >> 16) as u16;
        out[1] = value as u16;
        2
    };
    out[0] |= final_bit;
    len
}

/// Encodes an optional intermediate value merged with a node type.
pub(crate) fn encode_value_and_type(value: Option<i32>, node_type: u16, out: &mut [u16; 3]) -> usize {
    let Some(value) = value else {
        out[0] = node_type;
        return 1;
    };
    let len = if !(0..=MAX_TWO_UNIT_NODE_VALUE).contains(&value) {
        out[0] = THREE_UNIT_NODE_VALUE_LEAD;
        out[1] = ((value as u32) >> 16) as u16;
        out[2] = value as u16;
        3
    } else if value <= MAX_ONE_UNIT_NODE_VALUE {
        out[0] = ((value + 1) << 6) as u16;
        1
    } else {
        out[0] = MIN_TWO_UNIT_NODE_VALUE_LEAD + (((value >> 10) & 0x7fc0) as u16);
        out[1] = value as u16;
        2
    };
    out[0] |= node_type;
    len
}

/// Encodes a jump delta.
pub(crate) fn encode_delta(delta: usize, out: &mut [u16; 3]) -> usize {
    if delta <= MAX_ONE_UNIT_DELTA {
        out[0] = delta as u16;
        return 1;
    }
    let len = if delta <= MAX_TWO_UNIT_DELTA {
        out[0] = MIN_TWO_UNIT_DELTA_LEAD + (delta >> 16) as u16;
        1
    } else {
        out[0] = THREE_UNIT_DELTA_LEAD;
        out[1] = (delta >> 16) as u16;
        2
    };
    out[len] = delta as u16;
    len + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_value(value: i32) -> (i32, usize) {
        let mut buf = [0u16; 3];
        let len = encode_value(value, true, &mut buf);
        assert_ne!(buf[0] & VALUE_IS_FINAL, 0);
        (read_value(&buf, 1, buf[0] & 0x7fff), len)
    }

    #[test]
    fn value_width_thresholds() {
        let cases: Vec<(i32, usize)> = vec![
            (0, 1),
            (MAX_ONE_UNIT_VALUE, 1),
            (MAX_ONE_UNIT_VALUE + 1, 2),
            (MAX_TWO_UNIT_VALUE, 2),
            (MAX_TWO_UNIT_VALUE + 1, 3),
            (-1, 3),
            (i32::MIN, 3),
            (i32::MAX, 3),
        ];
        for (value, width) in cases {
            assert_eq!(roundtrip_value(value), (value, width), "value {value}");
        }
    }

    #[test]
    fn node_value_keeps_node_type_bits() {
        for value in [0, 1, 0xff, 0x100, 0x1234, MAX_TWO_UNIT_NODE_VALUE, MAX_TWO_UNIT_NODE_VALUE + 1, -7] {
            let mut buf = [0u16; 3];
            encode_value_and_type(Some(value), MIN_LINEAR_MATCH + 3, &mut buf);
            assert_eq!(buf[0] & NODE_TYPE_MASK, MIN_LINEAR_MATCH + 3);
            assert!(buf[0] >= MIN_VALUE_LEAD && buf[0] < VALUE_IS_FINAL);
            assert_eq!(read_node_value(&buf, 1, buf[0]), value, "value {value}");
        }
    }

    #[test]
    fn delta_roundtrip() {
        let deltas =
            [0usize, 1, MAX_ONE_UNIT_DELTA, MAX_ONE_UNIT_DELTA + 1, MAX_TWO_UNIT_DELTA, MAX_TWO_UNIT_DELTA + 1];
        for delta in deltas {
            let mut buf = [0u16; 3];
            let len = encode_delta(delta, &mut buf);
            assert_eq!(skip_delta(&buf, 0), len);
            assert_eq!(jump_by_delta(&buf, 0), len + delta);
        }
    }
}
