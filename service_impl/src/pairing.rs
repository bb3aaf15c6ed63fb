use std::collections::BTreeMap;

use service::booking::{Booking, BookingKind, BookingPair, PairKind, PairingOutcome};
use uuid::Uuid;

/// Joins the bookings of one employee-day into work and break pairs.
///
/// Bookings carrying an explicit `pair_id` (set by supervisors) are paired
/// by id; otherwise a state machine walks the time-ordered sequence.
/// Bookings the machine cannot place are reported as unpaired and skipped,
/// the calculation continues.
pub fn pair_bookings(bookings: &[Booking]) -> PairingOutcome {
    if bookings.iter().any(|booking| booking.pair_id.is_some()) {
        pair_by_pair_id(bookings)
    } else {
        pair_by_sequence(bookings)
    }
}

fn sorted_by_time(bookings: &[Booking]) -> Vec<&Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| {
        a.pairing_time()
            .cmp(&b.pairing_time())
            .then(a.kind.sort_rank().cmp(&b.kind.sort_rank()))
            .then(a.id.cmp(&b.id))
    });
    sorted
}

enum PairingState {
    Outside,
    InsideWork { start: i32, opened_by: Uuid },
    InsideBreak { start: i32, opened_by: Uuid },
}

fn pair_by_sequence(bookings: &[Booking]) -> PairingOutcome {
    let mut outcome = PairingOutcome::default();
    let mut state = PairingState::Outside;

    for booking in sorted_by_time(bookings) {
        let time = booking.pairing_time();
        state = match (state, booking.kind) {
            (PairingState::Outside, BookingKind::Come) => PairingState::InsideWork {
                start: time,
                opened_by: booking.id,
            },
            (PairingState::InsideWork { start, opened_by }, BookingKind::Go) => {
                match BookingPair::new(PairKind::Work, start, time) {
                    Some(pair) => {
                        outcome.pairs.push(pair);
                        PairingState::Outside
                    }
                    None => {
                        outcome.unpaired.push(booking.id);
                        PairingState::InsideWork { start, opened_by }
                    }
                }
            }
            (PairingState::InsideWork { start, opened_by }, BookingKind::BreakStart) => {
                match BookingPair::new(PairKind::Work, start, time) {
                    Some(pair) => {
                        outcome.pairs.push(pair);
                        PairingState::InsideBreak {
                            start: time,
                            opened_by: booking.id,
                        }
                    }
                    None => {
                        outcome.unpaired.push(booking.id);
                        PairingState::InsideWork { start, opened_by }
                    }
                }
            }
            (PairingState::InsideBreak { start, opened_by }, BookingKind::BreakEnd) => {
                match BookingPair::new(PairKind::Break, start, time) {
                    Some(pair) => {
                        outcome.pairs.push(pair);
                        // Work resumes at the end of the break.
                        PairingState::InsideWork {
                            start: time,
                            opened_by: booking.id,
                        }
                    }
                    None => {
                        outcome.unpaired.push(booking.id);
                        PairingState::InsideBreak { start, opened_by }
                    }
                }
            }
            (state, _) => {
                outcome.unpaired.push(booking.id);
                state
            }
        };
    }

    match state {
        PairingState::Outside => {}
        PairingState::InsideWork { opened_by, .. }
        | PairingState::InsideBreak { opened_by, .. } => {
            outcome.unpaired.push(opened_by);
        }
    }

    outcome
}

fn pair_by_pair_id(bookings: &[Booking]) -> PairingOutcome {
    let mut outcome = PairingOutcome::default();
    let mut groups: BTreeMap<Uuid, Vec<&Booking>> = BTreeMap::new();

    for booking in sorted_by_time(bookings) {
        match booking.pair_id {
            Some(pair_id) => groups.entry(pair_id).or_default().push(booking),
            None => outcome.unpaired.push(booking.id),
        }
    }

    for group in groups.values() {
        let pair = match group.as_slice() {
            [start, end] => match (start.kind, end.kind) {
                (BookingKind::Come, BookingKind::Go) => BookingPair::new(
                    PairKind::Work,
                    start.pairing_time(),
                    end.pairing_time(),
                ),
                (BookingKind::BreakStart, BookingKind::BreakEnd) => BookingPair::new(
                    PairKind::Break,
                    start.pairing_time(),
                    end.pairing_time(),
                ),
                _ => None,
            },
            _ => None,
        };
        match pair {
            Some(pair) => outcome.pairs.push(pair),
            None => outcome
                .unpaired
                .extend(group.iter().map(|booking| booking.id)),
        }
    }

    outcome.pairs.sort_by_key(|pair| pair.start_time);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::booking::BookingSource;
    use time::macros::date;

    fn booking(kind: BookingKind, time: i32) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            tenant_id: Uuid::nil(),
            employee_id: Uuid::nil(),
            date: date!(2024 - 03 - 04),
            kind,
            original_time: time,
            edited_time: None,
            calculated_time: None,
            pair_id: None,
            source: BookingSource::Terminal,
            created: None,
            deleted: None,
            version: Uuid::new_v4(),
        }
    }

    fn pair(kind: PairKind, start: i32, end: i32) -> BookingPair {
        BookingPair::new(kind, start, end).unwrap()
    }

    #[test]
    fn test_work_day_with_break_pairs() {
        let bookings = vec![
            booking(BookingKind::Come, 480),
            booking(BookingKind::BreakStart, 720),
            booking(BookingKind::BreakEnd, 750),
            booking(BookingKind::Go, 1020),
        ];
        let outcome = pair_bookings(&bookings);
        assert_eq!(
            outcome.pairs,
            vec![
                pair(PairKind::Work, 480, 720),
                pair(PairKind::Break, 720, 750),
                pair(PairKind::Work, 750, 1020),
            ]
        );
        assert!(!outcome.has_error());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut bookings = vec![
            booking(BookingKind::Go, 1020),
            booking(BookingKind::BreakEnd, 750),
            booking(BookingKind::Come, 480),
            booking(BookingKind::BreakStart, 720),
        ];
        let expected = pair_bookings(&bookings);
        bookings.reverse();
        assert_eq!(pair_bookings(&bookings), expected);
    }

    #[test]
    fn test_same_minute_ties_follow_kind_order() {
        // Go and come stamped at the same minute: come starts the day.
        let bookings = vec![
            booking(BookingKind::Go, 480),
            booking(BookingKind::Come, 480),
        ];
        let outcome = pair_bookings(&bookings);
        assert_eq!(outcome.pairs, vec![pair(PairKind::Work, 480, 480)]);
    }

    #[test]
    fn test_dangling_come_is_unpaired() {
        let come = booking(BookingKind::Come, 480);
        let come_id = come.id;
        let outcome = pair_bookings(&[come]);
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.unpaired, vec![come_id]);
        assert!(outcome.has_error());
    }

    #[test]
    fn test_go_without_come_is_unpaired_and_skipped() {
        let stray_go = booking(BookingKind::Go, 400);
        let stray_id = stray_go.id;
        let bookings = vec![
            stray_go,
            booking(BookingKind::Come, 480),
            booking(BookingKind::Go, 1020),
        ];
        let outcome = pair_bookings(&bookings);
        assert_eq!(outcome.pairs, vec![pair(PairKind::Work, 480, 1020)]);
        assert_eq!(outcome.unpaired, vec![stray_id]);
    }

    #[test]
    fn test_break_end_without_break_start_is_unpaired() {
        let stray = booking(BookingKind::BreakEnd, 700);
        let stray_id = stray.id;
        let bookings = vec![
            booking(BookingKind::Come, 480),
            stray,
            booking(BookingKind::Go, 1020),
        ];
        let outcome = pair_bookings(&bookings);
        assert_eq!(outcome.pairs, vec![pair(PairKind::Work, 480, 1020)]);
        assert_eq!(outcome.unpaired, vec![stray_id]);
    }

    #[test]
    fn test_pair_id_overrides_sequence() {
        let pair_a = Uuid::new_v4();
        let pair_b = Uuid::new_v4();
        let mut come = booking(BookingKind::Come, 480);
        come.pair_id = Some(pair_a);
        let mut go = booking(BookingKind::Go, 720);
        go.pair_id = Some(pair_a);
        let mut break_start = booking(BookingKind::BreakStart, 600);
        break_start.pair_id = Some(pair_b);
        let mut break_end = booking(BookingKind::BreakEnd, 630);
        break_end.pair_id = Some(pair_b);

        let outcome = pair_bookings(&[go, break_end, come, break_start]);
        assert_eq!(
            outcome.pairs,
            vec![
                pair(PairKind::Work, 480, 720),
                pair(PairKind::Break, 600, 630),
            ]
        );
        assert!(!outcome.has_error());
    }

    #[test]
    fn test_malformed_pair_id_group_is_unpaired() {
        let pair_a = Uuid::new_v4();
        let mut come = booking(BookingKind::Come, 480);
        come.pair_id = Some(pair_a);
        let mut second_come = booking(BookingKind::Come, 500);
        second_come.pair_id = Some(pair_a);
        let unmarked = booking(BookingKind::Go, 1020);
        let unmarked_id = unmarked.id;

        let outcome = pair_bookings(&[come, second_come, unmarked]);
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.unpaired.len(), 3);
        assert!(outcome.unpaired.contains(&unmarked_id));
    }

    #[test]
    fn test_pairing_is_idempotent_on_its_own_output() {
        let bookings = vec![
            booking(BookingKind::Come, 480),
            booking(BookingKind::BreakStart, 720),
            booking(BookingKind::BreakEnd, 750),
            booking(BookingKind::Go, 1020),
        ];
        let first = pair_bookings(&bookings);
        let second = pair_bookings(&pairs_to_bookings(&first.pairs));
        assert_eq!(second.pairs, first.pairs);
        assert!(!second.has_error());
    }

    /// Inverse of pairing: work pairs become come/go, break pairs become
    /// break punches, come/go at a break boundary are implied by the break.
    fn pairs_to_bookings(pairs: &[BookingPair]) -> Vec<Booking> {
        let mut bookings = Vec::new();
        for (index, p) in pairs.iter().enumerate() {
            match p.kind {
                PairKind::Break => {
                    bookings.push(booking(BookingKind::BreakStart, p.start_time));
                    bookings.push(booking(BookingKind::BreakEnd, p.end_time));
                }
                PairKind::Work => {
                    let follows_break = index > 0
                        && pairs[index - 1].kind == PairKind::Break
                        && pairs[index - 1].end_time == p.start_time;
                    let precedes_break = pairs.get(index + 1).is_some_and(|next| {
                        next.kind == PairKind::Break && next.start_time == p.end_time
                    });
                    if !follows_break {
                        bookings.push(booking(BookingKind::Come, p.start_time));
                    }
                    if !precedes_break {
                        bookings.push(booking(BookingKind::Go, p.end_time));
                    }
                }
            }
        }
        bookings
    }
}
