//! Help table rendering.

use fair_rps_core::{MoveSet, OutcomeMatrix};

const CORNER: &str = "v PC/User >";

/// Render the outcome table with the computer's move on each row and the
/// player's move in each column. Cells read from the player's side.
pub fn render(moves: &MoveSet, matrix: &OutcomeMatrix) -> String {
    let first_width = CORNER.chars().count().max(moves.max_label_width());
    let widths: Vec<usize> = moves
        .iter()
        .map(|label| label.chars().count().max("Lose".len()))
        .collect();

    let separator = {
        let mut line = format!("+{}+", "-".repeat(first_width + 2));
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let row_line = |first: &str, cells: Vec<&str>| {
        let mut line = format!("| {:<width$} |", first, width = first_width);
        for (cell, width) in cells.into_iter().zip(&widths) {
            line.push_str(&format!(" {:<width$} |", cell, width = *width));
        }
        line
    };

    let mut lines = vec![
        separator.clone(),
        row_line(CORNER, moves.iter().collect()),
        separator.clone(),
    ];
    for (pc, label) in moves.iter().enumerate() {
        let cells = (0..moves.len())
            .map(|player| matrix.get(player, pc).as_str())
            .collect();
        lines.push(row_line(label, cells));
        lines.push(separator.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fair_rps_core::RuleEngine;

    #[test]
    fn test_classic_table() {
        let engine = RuleEngine::from_labels(["rock", "scissors", "paper"]).unwrap();
        let table = render(engine.moves(), engine.outcome_matrix());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "+-------------+------+----------+-------+");
        assert_eq!(lines[1], "| v PC/User > | rock | scissors | paper |");
        assert_eq!(lines[3], "| rock        | Draw | Lose     | Win   |");
        assert_eq!(lines[5], "| scissors    | Win  | Draw     | Lose  |");
        assert_eq!(lines[7], "| paper       | Lose | Win      | Draw  |");
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_long_labels_widen_columns() {
        let engine = RuleEngine::from_labels(["a", "b", "an-extremely-long-move"]).unwrap();
        let table = render(engine.moves(), engine.outcome_matrix());
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();

        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert!(table.contains("| an-extremely-long-move |"));
    }
}
