use lap_types::Monitor;

/// Pick a monitor by 1-based index (`"2"`) or by exact name (`"Monitor 2"`)
///
/// An unknown or missing selector falls back to the primary monitor, then the first one.
pub fn select_monitor(monitors: &[Monitor], selector: Option<&str>) -> Option<Monitor> {
    let selected = selector.map(str::trim).and_then(|selector| {
        let by_index = selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| monitors.get(i));

        by_index.or_else(|| monitors.iter().find(|m| m.name.eq_ignore_ascii_case(selector)))
    });

    if let (None, Some(selector)) = (selected, selector) {
        tracing::warn!("Monitor '{selector}' not found, using the primary monitor");
    }

    selected
        .or_else(|| monitors.iter().find(|m| m.is_primary))
        .or_else(|| monitors.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors() -> Vec<Monitor> {
        vec![
            Monitor {
                index: 0,
                name: "Monitor 1".to_string(),
                x: -1920,
                y: 0,
                width: 1920,
                height: 1080,
                is_primary: false,
            },
            Monitor {
                index: 1,
                name: "Monitor 2".to_string(),
                x: 0,
                y: 0,
                width: 2560,
                height: 1440,
                is_primary: true,
            },
        ]
    }

    #[test]
    fn test_select_by_index_and_name() {
        let monitors = monitors();
        assert_eq!(select_monitor(&monitors, Some("1")).unwrap().index, 0);
        assert_eq!(select_monitor(&monitors, Some("Monitor 1")).unwrap().index, 0);
        assert_eq!(select_monitor(&monitors, Some(" monitor 2 ")).unwrap().index, 1);
    }

    #[test]
    fn test_unknown_falls_back_to_primary() {
        let monitors = monitors();
        assert_eq!(select_monitor(&monitors, None).unwrap().index, 1);
        assert_eq!(select_monitor(&monitors, Some("0")).unwrap().index, 1);
        assert_eq!(select_monitor(&monitors, Some("Monitor 9")).unwrap().index, 1);
    }

    #[test]
    fn test_without_primary_takes_first() {
        let mut monitors = monitors();
        monitors[1].is_primary = false;
        assert_eq!(select_monitor(&monitors, Some("nope")).unwrap().index, 0);
        assert!(select_monitor(&[], Some("1")).is_none());
    }
}
