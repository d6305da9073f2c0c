use std::fmt::Display;

/// Output format configuration
#[derive(Clone, Debug)]
pub struct OutputFormat {
    pub raw: bool,
}

impl OutputFormat {
    pub fn new(raw: bool) -> Self {
        Self { raw }
    }

    /// Print tabular data - either raw (tab-separated) or formatted (column-aligned)
    pub fn print_table<T>(&self, data: &[Vec<T>])
    where
        T: Display + AsRef<str>,
    {
        if data.is_empty() {
            return;
        }

        if self.raw {
            // Raw output: tab-separated values
            for row in data {
                let line = row
                    .iter()
                    .map(|cell| cell.as_ref())
                    .collect::<Vec<_>>()
                    .join("\t");
                println!("{line}");
            }
        } else {
            // Formatted output: column-aligned like `column -t`
            self.print_formatted_table(data);
        }
    }

    /// Print key-value pairs
    pub fn print_key_value<K, V>(&self, pairs: &[(K, V)])
    where
        K: Display + AsRef<str>,
        V: Display + AsRef<str>,
    {
        let data: Vec<Vec<String>> = pairs
            .iter()
            .map(|(k, v)| vec![k.to_string(), v.to_string()])
            .collect();

        self.print_table(&data);
    }

    fn print_formatted_table<T>(&self, data: &[Vec<T>])
    where
        T: Display + AsRef<str>,
    {
        if data.is_empty() {
            return;
        }

        // Calculate column widths
        let num_cols = data[0].len();
        let mut col_widths = vec![0; num_cols];

        for row in data {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.as_ref().len());
            }
        }

        // Print formatted rows
        for row in data {
            let formatted_cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == row.len() - 1 {
                        // Last column - no padding needed
                        cell.to_string()
                    } else {
                        // Pad to column width
                        format!("{:<width$}", cell.as_ref(), width = col_widths[i])
                    }
                })
                .collect();

            println!("{}", formatted_cells.join("  "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_output() {
        let format = OutputFormat::new(true);
        let data = vec![
            vec!["section", "variant", "file"],
            vec!["header", "default", "default_header.html"],
        ];

        // This would print:
        // section\tvariant\tfile
        // header\tdefault\tdefault_header.html
        format.print_table(&data);
    }

    #[test]
    fn test_formatted_output() {
        let format = OutputFormat::new(false);
        let data = vec![
            vec!["Subject CN", "alice"],
            vec!["Not After", "2026-08-20 00:00"],
        ];

        // This would print:
        // Subject CN  alice
        // Not After   2026-08-20 00:00
        format.print_key_value(&[("Subject CN", "alice"), ("Not After", "2026-08-20 00:00")]);
        format.print_table(&data);
    }
}
