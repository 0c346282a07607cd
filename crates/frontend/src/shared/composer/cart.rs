
/// Catalog item as offered to the cart
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
    /// `Some(stock)` when quantities are capped (sales), `None` for purchases
    pub stock: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub stock_limit: Option<u32>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    fn cap(&self) -> u32 {
        self.stock_limit.unwrap_or(u32::MAX)
    }
}

/// Lines keyed by item id. Every line has `1 <= quantity <= stock_limit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`. Returns `false` when nothing changed
    /// (no stock, or already at the cap).
    pub fn add_line(&mut self, item: &CatalogItem) -> bool {
        if item.stock == Some(0) {
            return false;
        }
        if let Some(line) = self.line_mut(item.id) {
            line.stock_limit = item.stock;
            let cap = line.cap();
            if line.quantity >= cap {
                line.quantity = cap;
                return false;
            }
            line.quantity += 1;
            return true;
        }
        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: 1,
            stock_limit: item.stock,
        });
        true
    }

    /// One unit less; the line disappears instead of reaching zero
    pub fn decrement(&mut self, item_id: i64) -> bool {
        let Some(pos) = self.position(item_id) else {
            return false;
        };
        if self.lines[pos].quantity <= 1 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity -= 1;
        }
        true
    }

    pub fn remove_line(&mut self, item_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        self.lines.len() != before
    }

    /// Clamp `n` into `[0, stock]`; zero (or less) removes the line
    pub fn set_quantity(&mut self, item_id: i64, n: i64) -> bool {
        if n <= 0 {
            return self.remove_line(item_id);
        }
        match self.line_mut(item_id) {
            Some(line) => {
                let wanted = u32::try_from(n).unwrap_or(u32::MAX);
                line.quantity = wanted.min(line.cap());
                true
            }
            None => false,
        }
    }

    /// Raw text from a quantity input. Anything that is not a number counts as 0.
    pub fn set_quantity_input(&mut self, item_id: i64, raw: &str) -> bool {
        self.set_quantity(item_id, parse_quantity(raw))
    }

    /// Purchases negotiate the unit price per line
    pub fn set_unit_price(&mut self, item_id: i64, price: f64) -> bool {
        if !price.is_finite() || price < 0.0 {
            return false;
        }
        match self.line_mut(item_id) {
            Some(line) => {
                line.unit_price = price;
                true
            }
            None => false,
        }
    }

    /// Sum of `unit_price × quantity`, computed on every call
    pub fn total(&self) -> f64 {
        // `sum()` of nothing is -0.0, which prints as "-0.00"
        self.lines.iter().fold(0.0, |acc, l| acc + l.line_total())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, item_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, item_id: i64) -> Option<usize> {
        self.lines.iter().position(|l| l.item_id == item_id)
    }

    fn line_mut(&mut self, item_id: i64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.item_id == item_id)
    }
}

fn parse_quantity(raw: &str) -> i64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::table::format_money;

    fn item(id: i64, price: f64, stock: Option<u32>) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("Producto {}", id),
            unit_price: price,
            stock,
        }
    }

    fn assert_invariants(cart: &Cart) {
        for line in cart.lines() {
            assert!(line.quantity >= 1, "zero quantity line {:?}", line);
            if let Some(limit) = line.stock_limit {
                assert!(line.quantity <= limit, "over stock {:?}", line);
            }
        }
        let expected: f64 = cart
            .lines()
            .iter()
            .map(|l| l.unit_price * l.quantity as f64)
            .sum();
        assert!((cart.total() - expected).abs() < 1e-9);
        let mut ids: Vec<_> = cart.lines().iter().map(|l| l.item_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cart.len());
    }

    #[test]
    fn test_total_scenario() {
        let a = item(1, 10.0, Some(5));
        let b = item(2, 5.0, Some(5));
        let mut cart = Cart::new();
        cart.add_line(&a);
        cart.add_line(&a);
        cart.add_line(&b);
        assert!((cart.total() - 25.0).abs() < 1e-9);

        cart.set_quantity(1, 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].item_id, 2);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert!((cart.total() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_respects_stock() {
        let mut cart = Cart::new();
        assert!(!cart.add_line(&item(1, 3.0, Some(0))));
        assert!(cart.is_empty());

        let limited = item(2, 3.0, Some(2));
        assert!(cart.add_line(&limited));
        assert!(cart.add_line(&limited));
        assert!(!cart.add_line(&limited));
        assert_eq!(cart.quantity_of(2), 2);
    }

    #[test]
    fn test_purchase_lines_are_uncapped() {
        let mut cart = Cart::new();
        let bulk = item(3, 1.5, None);
        for _ in 0..40 {
            cart.add_line(&bulk);
        }
        cart.set_quantity(3, 1_000);
        assert_eq!(cart.quantity_of(3), 1_000);
    }

    #[test]
    fn test_decrement_removes_at_one() {
        let mut cart = Cart::new();
        let a = item(1, 2.0, Some(3));
        cart.add_line(&a);
        cart.add_line(&a);
        assert!(cart.decrement(1));
        assert_eq!(cart.quantity_of(1), 1);
        assert!(cart.decrement(1));
        assert!(cart.is_empty());
        assert!(!cart.decrement(1));
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        cart.add_line(&item(1, 2.0, Some(4)));
        cart.set_quantity(1, 99);
        assert_eq!(cart.quantity_of(1), 4);
        cart.set_quantity(1, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_input_is_parsed_defensively() {
        let mut cart = Cart::new();
        cart.add_line(&item(1, 2.0, Some(10)));
        cart.set_quantity_input(1, " 7 ");
        assert_eq!(cart.quantity_of(1), 7);
        cart.set_quantity_input(1, "3.9");
        assert_eq!(cart.quantity_of(1), 3);
        cart.set_quantity_input(1, "abc");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_unit_price_rejects_negative() {
        let mut cart = Cart::new();
        cart.add_line(&item(1, 2.0, None));
        assert!(!cart.set_unit_price(1, -1.0));
        assert!(!cart.set_unit_price(1, f64::NAN));
        assert!(cart.set_unit_price(1, 4.25));
        assert!((cart.total() - 4.25).abs() < 1e-9);
    }

    #[test]
    fn test_interleaved_operations_keep_invariants() {
        let items = [item(1, 10.0, Some(3)), item(2, 4.5, Some(1)), item(3, 0.99, None)];
        let mut cart = Cart::new();
        for step in 0..60i64 {
            let target = &items[(step % 3) as usize];
            match step % 5 {
                0 | 1 => {
                    cart.add_line(target);
                }
                2 => {
                    cart.decrement(target.id);
                }
                3 => {
                    cart.set_quantity(target.id, step % 7 - 2);
                }
                _ => {
                    cart.set_quantity_input(target.id, &format!("{}", step % 4));
                }
            }
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_empty_cart_total_is_positive_zero() {
        let mut cart = Cart::new();
        assert!(cart.total().is_sign_positive());
        assert_eq!(format_money(cart.total()), "S/. 0.00");

        cart.add_line(&item(1, 3.0, None));
        cart.remove_line(1);
        assert_eq!(format_money(cart.total()), "S/. 0.00");
    }
}
