//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use vitrina_commerce::catalog::Product;
use vitrina_commerce::search::{Filter, SearchQuery, SortOption};
use vitrina_commerce::{Money, ProductId};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{sale_badge, stars};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List {
            category,
            search,
            sort,
            on_sale,
            min,
            max,
            in_stock,
            size,
            color,
            min_rating,
        } => {
            let filters = ListFilters {
                category,
                search,
                sort,
                on_sale,
                min,
                max,
                in_stock,
                size,
                color,
                min_rating,
            };
            list_products(&filters, ctx)
        }
        CatalogCommand::Show { id } => show_product(&id, ctx),
    }
}

/// Flags of `catalog list`.
#[derive(Debug, Default)]
struct ListFilters {
    category: Option<String>,
    search: Option<String>,
    sort: String,
    on_sale: bool,
    min: Option<f64>,
    max: Option<f64>,
    in_stock: bool,
    size: Option<String>,
    color: Option<String>,
    min_rating: Option<f64>,
}

impl ListFilters {
    fn to_query(&self, ctx: &Context) -> Result<SearchQuery> {
        let sort: SortOption = self.sort.parse().context("Invalid --sort value")?;
        let mut query = SearchQuery::new().with_sort(sort);

        if let Some(ref text) = self.search {
            query = query.with_query(text.as_str());
        }
        if let Some(ref category) = self.category {
            query = query.with_filter(Filter::category(category.as_str()));
        }
        if self.on_sale {
            query = query.with_filter(Filter::OnSale);
        }
        if self.in_stock {
            query = query.with_filter(Filter::InStock);
        }
        if let Some(ref size) = self.size {
            query = query.with_filter(Filter::Size(size.clone()));
        }
        if let Some(ref color) = self.color {
            query = query.with_filter(Filter::Color(color.clone()));
        }
        if let Some(min) = self.min_rating {
            query = query.with_filter(Filter::Rating { min });
        }
        if self.min.is_some() || self.max.is_some() {
            let currency = ctx.config.store.currency;
            query = query.with_filter(Filter::price_range(
                self.min.map(|p| Money::from_decimal(p, currency)),
                self.max.map(|p| Money::from_decimal(p, currency)),
            ));
        }

        Ok(query)
    }
}

fn list_products(filters: &ListFilters, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let query = filters.to_query(ctx)?;
    let products = store.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} product(s), sorted by {}",
        products.len(),
        query.sort.display_name()
    ));
    if products.is_empty() {
        ctx.output.info("No products match those filters");
        return Ok(());
    }

    let widths: [usize; 5] = [4, 28, 14, 14, 10];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in products {
        let price = format!(
            "{} {}",
            store.formatter().format(&product.price),
            sale_badge(product.discount)
        );
        let rating = format!("{:.1}", product.rating);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &price,
                &rating,
            ],
            &widths,
        );
    }

    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let product = store.product(&ProductId::new(id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, &store.formatter().format(&product.price), ctx);
    if product.is_on_sale() {
        ctx.output.kv(
            "Sale price",
            &format!(
                "{} {}",
                store.formatter().format(&product.discounted_price()),
                sale_badge(product.discount)
            ),
        );
    }

    Ok(())
}

fn print_product(product: &Product, price: &str, ctx: &Context) {
    let title = if product.is_new {
        format!("{} (new)", product.name)
    } else {
        product.name.clone()
    };
    ctx.output.header(&title);
    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }

    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv(
        "Category",
        &format!("{} / {}", product.category, product.subcategory),
    );
    ctx.output.kv("Price", price);
    ctx.output.kv("Sizes", &product.sizes.join(", "));
    ctx.output.kv("Colors", &product.colors.join(", "));
    ctx.output.kv(
        "Stock",
        &if product.is_in_stock() {
            product.stock.to_string()
        } else {
            "sold out".to_string()
        },
    );
    ctx.output.kv("Rating", &stars(product.rating));

    if !product.reviews.is_empty() {
        ctx.output.info(&format!("{} review(s):", product.reviews.len()));
        for review in &product.reviews {
            ctx.output.list_item(&format!(
                "{} ({}/5, {}): {}",
                review.user_name, review.rating, review.date, review.comment
            ));
        }
    }
}
