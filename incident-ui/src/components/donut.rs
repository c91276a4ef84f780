use incident_core::stats::DashboardStats;
use leptos::*;

// r = 54 in a 120x120 viewBox.
const CIRCUMFERENCE: f64 = 339.292;

/// Arc length for `count` out of `total` on the donut ring.
pub fn arc_length(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    CIRCUMFERENCE * count as f64 / total as f64
}

/// Status distribution donut: in-progress, finalized and the remainder
/// bucket, with the total in the center.
#[component]
pub fn StatusDonut(#[prop(into)] stats: Signal<DashboardStats>) -> impl IntoView {
    let dash = move |len: f64| format!("{len:.2} {CIRCUMFERENCE:.2}");

    let progress_dash = move || {
        let s = stats.get();
        dash(arc_length(s.in_progress, s.total))
    };
    let done_dash = move || {
        let s = stats.get();
        dash(arc_length(s.finalized, s.total))
    };
    let done_offset = move || {
        let s = stats.get();
        format!("{:.2}", -arc_length(s.in_progress, s.total))
    };
    let rest_dash = move || {
        let s = stats.get();
        dash(arc_length(s.remainder(), s.total))
    };
    let rest_offset = move || {
        let s = stats.get();
        format!("{:.2}", -arc_length(s.in_progress + s.finalized, s.total))
    };

    view! {
      <svg viewBox="0 0 120 120" class="donut" role="img">
        <g transform="rotate(-90 60 60)">
          <circle class="donut-ring" cx="60" cy="60" r="54" fill="none" stroke-width="12"/>
          <circle
            class="donut-segment donut-progress"
            cx="60" cy="60" r="54" fill="none" stroke-width="12"
            stroke-dasharray=progress_dash
          />
          <circle
            class="donut-segment donut-done"
            cx="60" cy="60" r="54" fill="none" stroke-width="12"
            stroke-dasharray=done_dash
            stroke-dashoffset=done_offset
          />
          <circle
            class="donut-segment donut-rest"
            cx="60" cy="60" r="54" fill="none" stroke-width="12"
            stroke-dasharray=rest_dash
            stroke-dashoffset=rest_offset
          />
        </g>
        <text x="60" y="58" text-anchor="middle" class="donut-total">
          {move || stats.get().total}
        </text>
        <text x="60" y="76" text-anchor="middle" class="donut-caption">"Total"</text>
      </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_lengths_partition_the_ring() {
        let stats = DashboardStats {
            total: 10,
            in_progress: 4,
            finalized: 3,
        };
        let sum = arc_length(stats.in_progress, stats.total)
            + arc_length(stats.finalized, stats.total)
            + arc_length(stats.remainder(), stats.total);
        assert!((sum - CIRCUMFERENCE).abs() < 1e-6);
    }

    #[test]
    fn empty_total_draws_nothing() {
        assert_eq!(arc_length(0, 0), 0.0);
        assert_eq!(arc_length(3, 0), 0.0);
    }
}
