//! Builds the parameterized count/data statements for the medicine listing.
//!
//! The count statement always carries the exact same filter predicate as the
//! data statement, minus ordering and pagination, so the reported totals can
//! never drift from the page contents.

/// Accepted listing filters. `rack` is parsed but currently never applied;
/// the frontend sends it ahead of racks getting stable identifiers.
#[derive(Debug, Clone, Default)]
pub struct MedicineFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub rack: Option<String>,
    pub sort: Option<String>,
}

/// A pair of statements plus the text arguments they share. The data
/// statement additionally expects LIMIT and OFFSET bound after these.
#[derive(Debug)]
pub struct ListStatements {
    pub count_sql: String,
    pub data_sql: String,
    pub text_args: Vec<String>,
}

const JOINS: &str = concat!(
    " FROM product p",
    " LEFT JOIN generic_name g ON p.generic_fk_id = g.id",
    " LEFT JOIN rack r ON p.rack_fk_id = r.id",
    " LEFT JOIN category c ON p.category_fk_id = c.id",
    " LEFT JOIN product_type pt ON p.product_type_fk_id = pt.id",
);

const COLUMNS: &str = concat!(
    " p.id, p.product_name,",
    " COALESCE(p.product_description, '') AS description,",
    " COALESCE(p.product_code, '') AS product_code,",
    " COALESCE(p.strength, '') AS strength,",
    " COALESCE(p.manufacture, '') AS manufacture,",
    " COALESCE(g.generic_name, '') AS generic_name,",
    " COALESCE(p.unit_price, 0)::float8 AS price,",
    " COALESCE(p.unit_mrp, 0)::float8 AS mrp,",
    " COALESCE(p.unit_cost_price, 0)::float8 AS buying_price,",
    " COALESCE(p.discount_percent, 0)::float8 AS discount,",
    " COALESCE(p.vat_percent, 0)::float8 AS vat,",
    " COALESCE(r.rack_name, '') AS rack_name,",
    " COALESCE(r.rack_location, '') AS rack_location,",
    " p.rack_fk_id,",
    " COALESCE(p.available_stock, 0) AS in_stock,",
    " COALESCE(c.category_name, '') AS category,",
    " COALESCE(pt.type_name, '') AS type_name,",
    " COALESCE(p.total_purchase, 0) AS total_purchase,",
    " COALESCE(p.total_sold, 0) AS total_sold,",
    " COALESCE(p.barcode, '') AS barcode,",
    " COALESCE(p.stock_alert, 0) AS stock_alert",
);

pub fn build(filter: &MedicineFilter) -> ListStatements {
    let mut where_clause = String::from(" WHERE p.deleted = 0");
    let mut text_args = Vec::new();
    let mut arg = 1;

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        where_clause.push_str(&format!(
            " AND (p.product_name ILIKE ${n} OR p.product_code ILIKE ${n} OR g.generic_name ILIKE ${n})",
            n = arg
        ));
        text_args.push(format!("%{}%", search));
        arg += 1;
    }

    if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
        match status {
            "low" => {
                where_clause.push_str(" AND p.available_stock < p.stock_alert AND p.available_stock > 0")
            }
            "out" => where_clause.push_str(" AND p.available_stock = 0"),
            "Active" | "Inactive" => {
                where_clause.push_str(&format!(" AND p.status = ${}", arg));
                text_args.push(status.to_string());
                arg += 1;
            }
            _ => {}
        }
    }

    // Rack filtering is accepted but not applied; see MedicineFilter.
    let _ = &filter.rack;

    let count_sql = format!("SELECT COUNT(*){JOINS}{where_clause}");
    let data_sql = format!(
        "SELECT{COLUMNS}{JOINS}{where_clause}{} LIMIT ${} OFFSET ${}",
        order_by(filter.sort.as_deref()),
        arg,
        arg + 1
    );

    ListStatements {
        count_sql,
        data_sql,
        text_args,
    }
}

/// Every sort applies an id tie-break in the same direction so pagination
/// stays stable across pages for rows with equal keys.
pub fn order_by(sort: Option<&str>) -> &'static str {
    match sort.unwrap_or("") {
        "sales_desc" => " ORDER BY p.total_sold DESC, p.id DESC",
        "sales_asc" => " ORDER BY p.total_sold ASC, p.id ASC",
        "price_desc" => " ORDER BY p.unit_price DESC, p.id DESC",
        "price_asc" => " ORDER BY p.unit_price ASC, p.id ASC",
        "name_asc" => " ORDER BY p.product_name ASC, p.id ASC",
        "name_desc" => " ORDER BY p.product_name DESC, p.id DESC",
        "date_asc" => " ORDER BY p.created_at ASC, p.id ASC",
        "date_desc" => " ORDER BY p.created_at DESC, p.id DESC",
        // Default: newest first
        _ => " ORDER BY p.created_at DESC, p.id DESC",
    }
}

pub fn total_pages(total_items: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total_items + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(search: Option<&str>, status: Option<&str>, sort: Option<&str>) -> MedicineFilter {
        MedicineFilter {
            search: search.map(String::from),
            status: status.map(String::from),
            rack: None,
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn bare_listing_has_only_the_soft_delete_predicate() {
        let stmts = build(&MedicineFilter::default());
        assert!(stmts.count_sql.starts_with("SELECT COUNT(*)"));
        assert!(stmts.count_sql.ends_with(" WHERE p.deleted = 0"));
        assert!(stmts.data_sql.contains(" WHERE p.deleted = 0 ORDER BY p.created_at DESC, p.id DESC"));
        assert!(stmts.data_sql.ends_with(" LIMIT $1 OFFSET $2"));
        assert!(stmts.text_args.is_empty());
    }

    #[test]
    fn search_matches_name_code_and_generic() {
        let stmts = build(&filter(Some("napa"), None, None));
        assert!(stmts.data_sql.contains(
            "(p.product_name ILIKE $1 OR p.product_code ILIKE $1 OR g.generic_name ILIKE $1)"
        ));
        assert_eq!(stmts.text_args, vec!["%napa%".to_string()]);
        assert!(stmts.data_sql.ends_with(" LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn count_and_data_share_the_filter_predicate() {
        let stmts = build(&filter(Some("cef"), Some("Active"), Some("price_asc")));
        let count_where = stmts.count_sql.split_once(" WHERE ").unwrap().1;
        let data_where = stmts
            .data_sql
            .split_once(" WHERE ")
            .unwrap()
            .1
            .split_once(" ORDER BY ")
            .unwrap()
            .0;
        assert_eq!(count_where, data_where);
        assert_eq!(stmts.text_args, vec!["%cef%".to_string(), "Active".to_string()]);
    }

    #[test]
    fn stock_status_filters_are_predicates_not_arguments() {
        let low = build(&filter(None, Some("low"), None));
        assert!(low
            .count_sql
            .contains("p.available_stock < p.stock_alert AND p.available_stock > 0"));
        assert!(low.text_args.is_empty());

        let out = build(&filter(None, Some("out"), None));
        assert!(out.count_sql.contains("p.available_stock = 0"));
        assert!(out.text_args.is_empty());

        let active = build(&filter(None, Some("Active"), None));
        assert!(active.count_sql.contains("p.status = $1"));
        assert_eq!(active.text_args, vec!["Active".to_string()]);
    }

    #[test]
    fn unknown_status_is_ignored() {
        let stmts = build(&filter(None, Some("everything"), None));
        assert!(stmts.count_sql.ends_with(" WHERE p.deleted = 0"));
        assert!(stmts.text_args.is_empty());
    }

    #[test]
    fn rack_filter_is_a_no_op() {
        let mut f = MedicineFilter::default();
        f.rack = Some("3".to_string());
        let with_rack = build(&f);
        let without = build(&MedicineFilter::default());
        assert_eq!(with_rack.count_sql, without.count_sql);
        assert_eq!(with_rack.data_sql, without.data_sql);
    }

    #[test]
    fn sort_keys_tie_break_on_id_in_the_same_direction() {
        assert_eq!(order_by(Some("sales_desc")), " ORDER BY p.total_sold DESC, p.id DESC");
        assert_eq!(order_by(Some("sales_asc")), " ORDER BY p.total_sold ASC, p.id ASC");
        assert_eq!(order_by(Some("price_desc")), " ORDER BY p.unit_price DESC, p.id DESC");
        assert_eq!(order_by(Some("price_asc")), " ORDER BY p.unit_price ASC, p.id ASC");
        assert_eq!(order_by(Some("name_asc")), " ORDER BY p.product_name ASC, p.id ASC");
        assert_eq!(order_by(Some("name_desc")), " ORDER BY p.product_name DESC, p.id DESC");
        assert_eq!(order_by(Some("date_asc")), " ORDER BY p.created_at ASC, p.id ASC");
    }

    #[test]
    fn unrecognized_sort_defaults_to_newest_first() {
        let newest = " ORDER BY p.created_at DESC, p.id DESC";
        assert_eq!(order_by(None), newest);
        assert_eq!(order_by(Some("")), newest);
        assert_eq!(order_by(Some("date_desc")), newest);
        assert_eq!(order_by(Some("bogus")), newest);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(98, 20), 5);
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(5, -1), 0);
    }
}
