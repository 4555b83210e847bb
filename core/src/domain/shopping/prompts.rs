pub fn shopping_links_prompt(item_names: &[String]) -> String {
    [
        format!(
            "Find online purchasing links for the following grocery ingredients for delivery in India: {}.",
            item_names.join(", ")
        ),
        "Use Google Search to find links from popular Indian online grocery platforms like Blinkit, Zepto, BigBasket, or Swiggy Instamart.".to_string(),
        "For each search result, provide the title of the page and the direct URL.".to_string(),
    ]
    .join("\n")
}
