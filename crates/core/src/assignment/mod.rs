//! Round-robin lead assignment
//!
//! Given the active admins ordered by display code and the admin who received
//! the most recent lead, pick the admin for the next lead.
//!
//! - No previous assignment: first admin.
//! - Previous admin at index `i`: admin at `(i + 1) mod n`.
//! - Previous admin no longer active: rotation restarts at the first admin.
//! - No active admins: `None`; the lead stays unassigned.

use covera_domain::Admin;

/// Pick the next member of a rotation identified by `id_of`.
pub fn next_in_rotation<'a, T, F>(
    members: &'a [T],
    last_assigned: Option<&str>,
    id_of: F,
) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let first = members.first()?;
    let Some(last) = last_assigned else {
        return Some(first);
    };

    match members.iter().position(|member| id_of(member) == last) {
        Some(index) => members.get((index + 1) % members.len()),
        None => Some(first),
    }
}

/// Pick the admin for the next lead.
pub fn next_admin<'a>(active_admins: &'a [Admin], last_assigned: Option<&str>) -> Option<&'a Admin> {
    next_in_rotation(active_admins, last_assigned, |admin| admin.id.as_str())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(names: &[&'static str]) -> Vec<&'static str> {
        names.to_vec()
    }

    fn pick<'a>(members: &'a [&'static str], last: Option<&str>) -> Option<&'a &'static str> {
        next_in_rotation(members, last, |m| m)
    }

    #[test]
    fn advances_to_following_admin() {
        let admins = ids(&["A", "B", "C"]);
        assert_eq!(pick(&admins, Some("B")), Some(&"C"));
    }

    #[test]
    fn wraps_after_last_admin() {
        let admins = ids(&["A", "B", "C"]);
        assert_eq!(pick(&admins, Some("C")), Some(&"A"));
    }

    #[test]
    fn starts_at_first_without_history() {
        let admins = ids(&["A", "B", "C"]);
        assert_eq!(pick(&admins, None), Some(&"A"));
    }

    #[test]
    fn restarts_when_previous_admin_left_rotation() {
        let admins = ids(&["A", "C"]);
        assert_eq!(pick(&admins, Some("B")), Some(&"A"));
    }

    #[test]
    fn empty_rotation_assigns_nobody() {
        let admins: Vec<&'static str> = Vec::new();
        assert_eq!(pick(&admins, None), None);
        assert_eq!(pick(&admins, Some("A")), None);
    }

    #[test]
    fn single_admin_always_chosen() {
        let admins = ids(&["solo"]);
        assert_eq!(pick(&admins, Some("solo")), Some(&"solo"));
    }

    #[test]
    fn full_cycle_visits_every_admin_once() {
        for size in 1..=7 {
            let admins: Vec<String> = (0..size).map(|i| format!("admin-{i}")).collect();
            let mut last: Option<String> = None;
            let mut seen = HashSet::new();

            for _ in 0..size {
                let next = next_in_rotation(&admins, last.as_deref(), String::as_str)
                    .expect("non-empty rotation")
                    .clone();
                assert!(seen.insert(next.clone()), "{next} chosen twice within one cycle");
                last = Some(next);
            }
            assert_eq!(seen.len(), size);

            // The cycle then repeats from the start.
            let again = next_in_rotation(&admins, last.as_deref(), String::as_str);
            assert_eq!(again, admins.first());
        }
    }
}
