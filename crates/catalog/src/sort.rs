//! Total-order comparators for product grids and the order list.
//!
//! Sorting is applied after filtering and before pagination. All sorts are
//! stable, so ties keep their source order.

use std::cmp::Ordering;

use clementine_core::{OrderSummary, Product};

/// Sort axis for a storefront product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    Oldest,
}

impl ProductSort {
    /// Parse a sort axis from a query-string parameter.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s {
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "oldest" => Self::Oldest,
            _ => Self::Newest,
        }
    }

    /// The query-string parameter for this axis.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// Label shown in the sort dropdown.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Newest => "Newest Arrivals",
            Self::Oldest => "Oldest First",
        }
    }
}

/// Sort a product grid in place.
pub fn sort_products(products: &mut [Product], sort: ProductSort) {
    match sort {
        ProductSort::NameAsc => products.sort_by(|a, b| compare_names(&a.title, &b.title)),
        ProductSort::NameDesc => products.sort_by(|a, b| compare_names(&b.title, &a.title)),
        ProductSort::PriceAsc => products.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        ProductSort::PriceDesc => products.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
        ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ProductSort::Oldest => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// Sort axis for the merchant dashboard's order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    Newest,
    Oldest,
    CustomerAsc,
    CustomerDesc,
    TotalAsc,
    TotalDesc,
}

impl OrderSort {
    /// Parse a sort axis from a query-string parameter.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s {
            "oldest" => Self::Oldest,
            "customer_asc" => Self::CustomerAsc,
            "customer_desc" => Self::CustomerDesc,
            "total_asc" => Self::TotalAsc,
            "total_desc" => Self::TotalDesc,
            _ => Self::Newest,
        }
    }

    /// The query-string parameter for this axis.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::CustomerAsc => "customer_asc",
            Self::CustomerDesc => "customer_desc",
            Self::TotalAsc => "total_asc",
            Self::TotalDesc => "total_desc",
        }
    }
}

/// Sort the order list in place.
pub fn sort_orders(orders: &mut [OrderSummary], sort: OrderSort) {
    match sort {
        OrderSort::Newest => orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at)),
        OrderSort::Oldest => orders.sort_by(|a, b| a.placed_at.cmp(&b.placed_at)),
        OrderSort::CustomerAsc => {
            orders.sort_by(|a, b| compare_names(&a.customer_name, &b.customer_name));
        }
        OrderSort::CustomerDesc => {
            orders.sort_by(|a, b| compare_names(&b.customer_name, &a.customer_name));
        }
        OrderSort::TotalAsc => orders.sort_by(|a, b| a.total.amount.cmp(&b.total.amount)),
        OrderSort::TotalDesc => orders.sort_by(|a, b| b.total.amount.cmp(&a.total.amount)),
    }
}

/// Case-insensitive name comparison.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::test_support::plain_product;
    use chrono::{Duration, Utc};
    use clementine_core::{CurrencyCode, OrderId, Price, TenantId};
    use rust_decimal::Decimal;

    fn named_product(id: &str, title: &str, price: u32, age_days: i64) -> Product {
        let mut product = plain_product(id, price);
        product.title = title.to_string();
        product.created_at = Utc::now() - Duration::days(age_days);
        product
    }

    fn order(id: &str, customer: &str, total: u32, age_days: i64) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(id),
            tenant: TenantId::new("tenant-1"),
            customer_name: customer.to_string(),
            total: Price::new(Decimal::from(total), CurrencyCode::USD),
            placed_at: Utc::now() - Duration::days(age_days),
        }
    }

    fn product_ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let mut products = vec![
            named_product("p1", "zinc planter", 10, 0),
            named_product("p2", "Apple bowl", 20, 0),
            named_product("p3", "mango tray", 30, 0),
        ];
        sort_products(&mut products, ProductSort::NameAsc);
        assert_eq!(product_ids(&products), vec!["p2", "p3", "p1"]);

        sort_products(&mut products, ProductSort::NameDesc);
        assert_eq!(product_ids(&products), vec!["p1", "p3", "p2"]);
    }

    #[test]
    fn test_price_sort() {
        let mut products = vec![
            named_product("p1", "a", 30, 0),
            named_product("p2", "b", 10, 0),
            named_product("p3", "c", 20, 0),
        ];
        sort_products(&mut products, ProductSort::PriceAsc);
        assert_eq!(product_ids(&products), vec!["p2", "p3", "p1"]);

        sort_products(&mut products, ProductSort::PriceDesc);
        assert_eq!(product_ids(&products), vec!["p1", "p3", "p2"]);
    }

    #[test]
    fn test_newest_is_default_and_descending() {
        let mut products = vec![
            named_product("old", "a", 10, 30),
            named_product("new", "b", 20, 1),
            named_product("mid", "c", 30, 10),
        ];
        sort_products(&mut products, ProductSort::default());
        assert_eq!(product_ids(&products), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_price_ties_keep_source_order() {
        let mut products = vec![
            named_product("first", "a", 10, 0),
            named_product("second", "b", 10, 0),
            named_product("third", "c", 5, 0),
        ];
        sort_products(&mut products, ProductSort::PriceAsc);
        assert_eq!(product_ids(&products), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_order_sort_by_customer() {
        let mut orders = vec![
            order("o1", "carol", 10, 0),
            order("o2", "Alice", 20, 0),
            order("o3", "bob", 30, 0),
        ];
        sort_orders(&mut orders, OrderSort::CustomerAsc);
        let customers: Vec<&str> = orders.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(customers, vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn test_order_sort_by_recency() {
        let mut orders = vec![
            order("o1", "a", 10, 5),
            order("o2", "b", 20, 1),
            order("o3", "c", 30, 10),
        ];
        sort_orders(&mut orders, OrderSort::default());
        let order_ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order_ids, vec!["o2", "o1", "o3"]);
    }

    #[test]
    fn test_sort_param_round_trip() {
        for sort in [
            ProductSort::NameAsc,
            ProductSort::NameDesc,
            ProductSort::PriceAsc,
            ProductSort::PriceDesc,
            ProductSort::Newest,
            ProductSort::Oldest,
        ] {
            assert_eq!(ProductSort::from_param(sort.as_str()), sort);
        }
        assert_eq!(ProductSort::from_param("garbage"), ProductSort::Newest);
    }
}
