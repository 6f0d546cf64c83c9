use railbook_shared::{ClassAvailability, Wagon};

/// Seats per synthesized block when the backend reports only class totals.
pub const BLOCK_SEATS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagonSource {
    /// Real inventory reported by the backend.
    Reported,
    /// Presentation approximation derived from class totals. Never
    /// authoritative; a wagon from this source cannot be submitted against.
    Synthesized,
}

/// A wagon as the seat-selection screen sees it, regardless of whether the
/// backend reported it or the flow synthesized it.
#[derive(Debug, Clone, PartialEq)]
pub struct WagonView {
    /// Backend id; absent on synthesized blocks.
    pub id: Option<i64>,
    pub number: u32,
    pub class_name: String,
    pub total_seats: u32,
    pub available_seats: u32,
    pub source: WagonSource,
}

pub fn from_reported(wagons: &[Wagon]) -> Vec<WagonView> {
    wagons
        .iter()
        .map(|w| WagonView {
            id: Some(w.id),
            number: w.number,
            class_name: w.wagon_type.name.clone(),
            total_seats: w.total_seats,
            available_seats: w.available_seats,
            source: WagonSource::Reported,
        })
        .collect()
}

/// Break a class's aggregate capacity into fixed-size blocks, pro-rating
/// availability so the blocks sum exactly to the reported figures.
///
/// The prefix arithmetic keeps each block's share within its capacity and
/// makes the split deterministic for a given input.
pub fn synthesize_blocks(class: &ClassAvailability) -> Vec<WagonView> {
    let total = class.total_seats;
    let available = class.available_seats.min(total);
    if total == 0 {
        return Vec::new();
    }

    let block_count = total.div_ceil(BLOCK_SEATS);
    let mut views = Vec::with_capacity(block_count as usize);
    let mut seats_before = 0u32;
    let mut assigned_before = 0u32;

    for index in 0..block_count {
        let block_total = BLOCK_SEATS.min(total - seats_before);
        seats_before += block_total;

        // Availability assigned to the prefix ending at this block.
        let assigned_prefix =
            ((available as u64 * seats_before as u64) / total as u64) as u32;
        let block_available = assigned_prefix - assigned_before;
        assigned_before = assigned_prefix;

        views.push(WagonView {
            id: None,
            number: index + 1,
            class_name: class.class_name.clone(),
            total_seats: block_total,
            available_seats: block_available,
            source: WagonSource::Synthesized,
        });
    }

    views
}
