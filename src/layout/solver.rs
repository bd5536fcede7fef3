//! The per-axis constraint model and space partitioner.
//!
//! A [`Constraint`] describes how one axis of an element's size is
//! determined. [`resolve_axis`] picks the winning constraint from the
//! precedence chain (explicit > stylesheet > fit > container default), and
//! [`solve_axis`] partitions a run of cells among a list of constraints.

/// How one axis of an element's size is determined.
///
/// Exactly one variant applies per axis; width and height are resolved
/// independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Exactly `n` cells.
    Length(i32),
    /// `round(p / 100 * available)` cells.
    Percentage(i32),
    /// `round(num / den * available)` cells.
    Ratio(u32, u32),
    /// A weighted share of the space left after fixed constraints.
    Fill(u32),
    /// Flexible, but never fewer than `n` cells.
    Min(i32),
    /// Flexible, but never more than `n` cells.
    Max(i32),
    /// The container decides. Falls through the precedence chain.
    Unspecified,
}

impl Constraint {
    /// A ratio constraint. Panics if `den` is zero.
    pub fn ratio(num: u32, den: u32) -> Constraint {
        assert!(den != 0, "Constraint::ratio denominator must be non-zero");
        Constraint::Ratio(num, den)
    }

    /// A weighted fill constraint. Panics if `weight` is zero.
    pub fn fill(weight: u32) -> Constraint {
        assert!(weight != 0, "Constraint::fill weight must be non-zero");
        Constraint::Fill(weight)
    }

    /// Whether this constraint takes a share of leftover space rather than
    /// a size computable up front.
    #[inline]
    pub const fn is_flexible(self) -> bool {
        matches!(
            self,
            Constraint::Fill(_) | Constraint::Min(_) | Constraint::Max(_) | Constraint::Unspecified
        )
    }
}

/// Resolve one axis through the precedence chain.
///
/// Highest to lowest: explicit programmatic constraint, stylesheet-resolved
/// constraint, intrinsic fit constraint, then the container's default. A
/// `None` or [`Constraint::Unspecified`] at one level falls through to the
/// next.
pub fn resolve_axis(
    explicit: Option<Constraint>,
    css: Option<Constraint>,
    fit: Option<Constraint>,
    container_default: Constraint,
) -> Constraint {
    for source in [explicit, css, fit] {
        match source {
            Some(Constraint::Unspecified) | None => continue,
            Some(c) => return c,
        }
    }
    container_default
}

/// Partition `available` cells among `constraints`, in order.
///
/// Fixed constraints (`Length`, `Percentage`, `Ratio`) are satisfied first.
/// The remaining space is then walked once, front to back, handing each
/// flexible entry its weighted share of what is still left; since the last
/// flexible entry receives everything that remains of its pool, every
/// leftover cell lands on the last flexible child in source order. `Min`
/// and `Max` clamp their own share (up and down respectively); space freed
/// by a `Max` cap flows to the flexible entries after it.
///
/// Returned sizes are never negative. `Min` floors can push the total past
/// `available`; callers place children sequentially and clip at the edge.
pub fn solve_axis(constraints: &[Constraint], available: i32) -> Vec<i32> {
    let available = available.max(0);
    let mut sizes = vec![0i32; constraints.len()];

    // Fixed pass.
    let mut remaining = available;
    for (i, &c) in constraints.iter().enumerate() {
        let fixed = match c {
            Constraint::Length(n) => n.max(0),
            Constraint::Percentage(p) => ratio_of(available, p.max(0) as i64, 100),
            Constraint::Ratio(num, den) => ratio_of(available, num as i64, den as i64),
            _ => continue,
        };
        sizes[i] = fixed;
        remaining -= fixed;
    }
    remaining = remaining.max(0);

    // Flexible pass. Each entry takes its weighted share of what is left,
    // so the final flexible entry absorbs the remainder cells.
    let mut weight_left: i64 = constraints
        .iter()
        .filter(|c| c.is_flexible())
        .map(|c| flex_weight(*c))
        .sum();
    for (i, &c) in constraints.iter().enumerate() {
        if !c.is_flexible() {
            continue;
        }
        let w = flex_weight(c);
        // Floor division: every remainder cell drifts to the last flexible
        // entry, which takes the whole of its pool.
        let share = (remaining as i64 * w / weight_left.max(1)) as i32;
        let granted = match c {
            Constraint::Min(n) => share.max(n.max(0)),
            Constraint::Max(n) => share.min(n.max(0)),
            _ => share,
        };
        sizes[i] = granted;
        remaining = (remaining - granted).max(0);
        weight_left -= w;
    }

    sizes
}

/// `round(total * num / den)`, saturating at zero.
#[inline]
fn ratio_of(total: i32, num: i64, den: i64) -> i32 {
    if den <= 0 || total <= 0 || num <= 0 {
        return 0;
    }
    let scaled = total as i64 * num;
    // Round half up.
    (((scaled * 2 + den) / (den * 2)) as i32).max(0)
}

#[inline]
fn flex_weight(c: Constraint) -> i64 {
    match c {
        Constraint::Fill(w) => w as i64,
        _ => 1,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -----------------------------------------------------------------------
    // resolve_axis precedence
    // -----------------------------------------------------------------------

    #[test]
    fn explicit_beats_css_beats_fit() {
        let explicit = Some(Constraint::Length(10));
        let css = Some(Constraint::Length(20));
        let fit = Some(Constraint::Length(30));
        let fallback = Constraint::Fill(1);

        assert_eq!(resolve_axis(explicit, css, fit, fallback), Constraint::Length(10));
        assert_eq!(resolve_axis(None, css, fit, fallback), Constraint::Length(20));
        assert_eq!(resolve_axis(None, None, fit, fallback), Constraint::Length(30));
        assert_eq!(resolve_axis(None, None, None, fallback), Constraint::Fill(1));
    }

    #[test]
    fn unspecified_falls_through_each_level() {
        let u = Some(Constraint::Unspecified);
        let css = Some(Constraint::Length(20));
        assert_eq!(resolve_axis(u, css, None, Constraint::Fill(1)), Constraint::Length(20));
        assert_eq!(resolve_axis(u, u, u, Constraint::Length(1)), Constraint::Length(1));
    }

    // -----------------------------------------------------------------------
    // Fixed constraints
    // -----------------------------------------------------------------------

    #[test]
    fn lengths_take_exact_sizes() {
        let sizes = solve_axis(&[Constraint::Length(5), Constraint::Length(3)], 20);
        assert_eq!(sizes, vec![5, 3]);
    }

    #[test]
    fn negative_length_clamps_to_zero() {
        let sizes = solve_axis(&[Constraint::Length(-4), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![0, 10]);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 25% of 10 = 2.5 rounds to 3.
        let sizes = solve_axis(&[Constraint::Percentage(25)], 10);
        assert_eq!(sizes, vec![3]);
        // 50% of 21 = 10.5 rounds to 11.
        let sizes = solve_axis(&[Constraint::Percentage(50)], 21);
        assert_eq!(sizes, vec![11]);
    }

    #[test]
    fn ratio_resolves_against_available() {
        let sizes = solve_axis(&[Constraint::Ratio(1, 3), Constraint::Fill(1)], 30);
        assert_eq!(sizes, vec![10, 20]);
    }

    #[test]
    fn ratio_constructor_rejects_zero_denominator() {
        let result = std::panic::catch_unwind(|| Constraint::ratio(1, 0));
        assert!(result.is_err());
    }

    #[test]
    fn fill_constructor_rejects_zero_weight() {
        let result = std::panic::catch_unwind(|| Constraint::fill(0));
        assert!(result.is_err());
    }

    // -----------------------------------------------------------------------
    // Fill distribution
    // -----------------------------------------------------------------------

    #[test]
    fn fill_splits_evenly() {
        let sizes = solve_axis(&[Constraint::Fill(1), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![5, 5]);
    }

    #[test]
    fn fill_respects_weights() {
        let sizes = solve_axis(&[Constraint::Fill(1), Constraint::Fill(3)], 20);
        assert_eq!(sizes, vec![5, 15]);
    }

    #[test]
    fn fill_remainder_goes_to_last_child() {
        let sizes = solve_axis(&[Constraint::Fill(1), Constraint::Fill(1), Constraint::Fill(1)], 10);
        assert_eq!(sizes.iter().sum::<i32>(), 10);
        assert_eq!(sizes, vec![3, 3, 4]);
    }

    #[test]
    fn fill_distribution_is_deterministic() {
        let constraints = [Constraint::Fill(2), Constraint::Fill(3), Constraint::Fill(2)];
        let first = solve_axis(&constraints, 17);
        for _ in 0..10 {
            assert_eq!(solve_axis(&constraints, 17), first);
        }
        assert_eq!(first.iter().sum::<i32>(), 17);
    }

    #[test]
    fn fill_takes_space_after_fixed() {
        let sizes = solve_axis(
            &[Constraint::Length(4), Constraint::Fill(1), Constraint::Percentage(50)],
            20,
        );
        // 4 fixed + 10 percentage leaves 6 for the fill.
        assert_eq!(sizes, vec![4, 6, 10]);
    }

    #[test]
    fn overcommitted_fixed_leaves_nothing_to_fill() {
        let sizes = solve_axis(&[Constraint::Length(30), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![30, 0]);
    }

    // -----------------------------------------------------------------------
    // Min / Max clamps
    // -----------------------------------------------------------------------

    #[test]
    fn min_floors_its_share() {
        let sizes = solve_axis(&[Constraint::Min(8), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![8, 2]);
    }

    #[test]
    fn min_can_overflow_available() {
        let sizes = solve_axis(&[Constraint::Min(15), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![15, 0]);
    }

    #[test]
    fn max_caps_its_share_and_frees_the_rest() {
        let sizes = solve_axis(&[Constraint::Max(2), Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![2, 8]);
    }

    #[test]
    fn max_below_cap_takes_its_share() {
        // Even split of 6 between two flexibles is 3, under the cap of 5.
        let sizes = solve_axis(&[Constraint::Max(5), Constraint::Fill(1)], 6);
        assert_eq!(sizes, vec![3, 3]);
    }

    // -----------------------------------------------------------------------
    // Degenerate inputs
    // -----------------------------------------------------------------------

    #[test]
    fn empty_constraint_list() {
        assert!(solve_axis(&[], 10).is_empty());
    }

    #[test]
    fn zero_available_space() {
        let sizes = solve_axis(&[Constraint::Fill(1), Constraint::Length(5)], 0);
        assert_eq!(sizes, vec![0, 5]);
    }

    #[test]
    fn negative_available_space_treated_as_zero() {
        let sizes = solve_axis(&[Constraint::Fill(1)], -7);
        assert_eq!(sizes, vec![0]);
    }

    #[test]
    fn unspecified_participates_as_unit_fill() {
        let sizes = solve_axis(&[Constraint::Unspecified, Constraint::Fill(1)], 10);
        assert_eq!(sizes, vec![5, 5]);
    }
}
