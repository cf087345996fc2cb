//! Public menu: the dish list with optional text and price filters, and the
//! popular-dish highlights for the landing view.

use std::fmt::Write;

use crate::models::Dish;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl MenuFilter {
    /// Parses `[search words] [--min N] [--max N]`.
    pub fn parse(args: &[&str]) -> Result<Self, String> {
        let mut filter = MenuFilter::default();
        let mut words = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match *arg {
                "--min" | "--max" => {
                    let raw = iter.next().ok_or_else(|| format!("{arg} needs a price"))?;
                    let price: f64 = raw.parse().map_err(|_| format!("{arg}: {raw:?} is not a price"))?;
                    if *arg == "--min" {
                        filter.min_price = Some(price);
                    } else {
                        filter.max_price = Some(price);
                    }
                }
                word => words.push(word),
            }
        }

        if !words.is_empty() {
            filter.search = Some(words.join(" "));
        }
        Ok(filter)
    }

    pub fn matches(&self, dish: &Dish) -> bool {
        if let Some(term) = self.search_term() {
            let hit = dish.name.to_lowercase().contains(&term)
                || dish.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| dish.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| dish.price > max) {
            return false;
        }
        true
    }

    pub fn apply(&self, dishes: &[Dish]) -> Vec<Dish> {
        dishes.iter().filter(|d| self.matches(d)).cloned().collect()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

pub fn popular(dishes: &[Dish]) -> Vec<Dish> {
    dishes.iter().filter(|d| d.is_popular).cloned().collect()
}

pub fn render(title: &str, dishes: &[Dish]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if dishes.is_empty() {
        let _ = writeln!(out, "  No dishes found.");
    }
    for dish in dishes {
        let star = if dish.is_popular { " *" } else { "" };
        let _ = writeln!(out, "  {:<32} {:>8.2}{}", dish.name, dish.price, star);
        if !dish.description.is_empty() {
            let _ = writeln!(out, "      {}", dish.description);
        }
    }
    out
}
