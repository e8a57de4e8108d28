//! Raw state of the plot form: every field is kept as the text the user typed.

/// Text fields and the legend toggle, read fresh on every plot request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotForm {
    pub formula: String,
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
    pub x_title: String,
    pub y_title: String,
    pub title: String,
    pub legend: bool,
}

impl Default for PlotForm {
    fn default() -> Self {
        PlotForm {
            formula: String::new(),
            x_min: "-10".to_string(),
            x_max: "10".to_string(),
            y_min: "-10".to_string(),
            y_max: "10".to_string(),
            x_title: "x".to_string(),
            y_title: "y".to_string(),
            title: String::new(),
            legend: false,
        }
    }
}

impl PlotForm {
    pub fn new(formula: &str) -> Self {
        PlotForm {
            formula: formula.to_string(),
            ..Default::default()
        }
    }

    pub fn with_x_range(mut self, x_min: &str, x_max: &str) -> Self {
        self.x_min = x_min.to_string();
        self.x_max = x_max.to_string();
        self
    }

    pub fn with_y_range(mut self, y_min: &str, y_max: &str) -> Self {
        self.y_min = y_min.to_string();
        self.y_max = y_max.to_string();
        self
    }

    /// Inserts text at the cursor of the formula field. The cursor always sits at the end.
    pub fn formula_add(&mut self, text: &str) {
        self.formula.push_str(text);
    }

    /// (field name, value) pairs in form order, for display.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("formula", self.formula.clone()),
            ("x_min", self.x_min.clone()),
            ("x_max", self.x_max.clone()),
            ("y_min", self.y_min.clone()),
            ("y_max", self.y_max.clone()),
            ("x_title", self.x_title.clone()),
            ("y_title", self.y_title.clone()),
            ("title", self.title.clone()),
            ("legend", self.legend.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_add_appends() {
        let mut form = PlotForm::new("x");
        form.formula_add("^2");
        form.formula_add("; sin(x)");
        assert_eq!(form.formula, "x^2; sin(x)");
    }

    #[test]
    fn test_builders() {
        let form = PlotForm::new("sin(x)")
            .with_x_range("-5", "5")
            .with_y_range("-1", "1");
        assert_eq!(form.x_min, "-5");
        assert_eq!(form.y_max, "1");
        assert!(!form.legend);
        assert_eq!(form.fields().len(), 9);
    }
}
