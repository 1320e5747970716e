//! 店面命令行
//! 通过后端 API 获取目录，按搜索词、价格区间和排序方式打印展示视图

use clap::Parser;
use storefront::app::storefront::{top_deals, PriceRange, QueryState, SortKey, Storefront};
use storefront::config::load_config;
use storefront::core::service::ProductFeed;
use storefront::infrastructure::{api_client::StorefrontApiClient, logger::Logger};
use storefront::{Product, ProductId};

#[derive(Parser)]
#[command(version, about = "Browse the storefront catalog", long_about = None)]
struct Cli {
    /// 后端 API 根地址，默认取配置中的 storefront.api_base
    #[arg(long)]
    api_base: Option<String>,

    /// 搜索词，匹配标题或描述（不区分大小写）
    #[arg(short, long, default_value = "")]
    search: String,

    /// all, under-500, 500-1000, 1000-2000, over-2000
    #[arg(short, long, default_value_t = PriceRange::All)]
    price: PriceRange,

    /// relevance, price-low, price-high, name
    #[arg(long, default_value_t = SortKey::Relevance)]
    sort: SortKey,

    /// 只展示前 6 个产品
    #[arg(long)]
    top_deals: bool,

    /// 获取单个产品并以 JSON 输出
    #[arg(long)]
    id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, _) = load_config()?;
    Logger::init(&config.logging);

    let api_base = cli.api_base.as_deref().unwrap_or(&config.storefront.api_base);
    let client = StorefrontApiClient::new(api_base)?;

    if let Some(raw_id) = &cli.id {
        let envelope = client.fetch_products(Some(&ProductId::from_path(raw_id))).await;
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    let mut storefront = Storefront::new();
    storefront.load(&client).await;
    storefront.set_query(QueryState::new(cli.search, cli.price, cli.sort));

    if let Some(err) = storefront.last_error() {
        eprintln!("⚠️  获取产品失败: {}", err);
    }

    let summary = storefront.summary();
    println!("{}", summary.heading);
    println!("{}", summary.count_label);
    println!();

    if summary.is_empty() {
        println!("No products found");
        println!("Try adjusting your search or filter criteria");
        return Ok(());
    }

    let view = storefront.view();
    let shown = if cli.top_deals { top_deals(&view) } else { &view[..] };
    for product in shown {
        print_product(product);
    }

    Ok(())
}

fn print_product(product: &Product) {
    println!(
        "{:>6}  {:<40}  {:>12}  (was {})",
        product.id.to_string(),
        product.title,
        product.display_price(),
        product.display_compare_at_price()
    );
    if !product.description.is_empty() {
        println!("        {}", product.description);
    }
    println!("        {}", product.image_or_placeholder());
}
