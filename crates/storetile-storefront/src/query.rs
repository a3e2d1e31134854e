//! The collection products query and its variables.

use serde::Serialize;

/// Fields needed to build a tile: swatch and hover-image metafields on
/// variants, the sale discount metafield on the product.
pub const COLLECTION_PRODUCTS_QUERY: &str = r#"
query getCollectionProducts(
  $handle: String!
  $sortKey: ProductCollectionSortKeys
  $reverse: Boolean
) {
  collection(handle: $handle) {
    products(sortKey: $sortKey, reverse: $reverse, first: 100) {
      edges {
        node {
          ...product
        }
      }
    }
  }
}

fragment image on Image {
  url
  altText
  width
  height
}

fragment money on MoneyV2 {
  amount
  currencyCode
}

fragment product on Product {
  id
  handle
  availableForSale
  title
  vendor
  tags
  options {
    id
    name
    values
  }
  metafields(identifiers: [{ namespace: "sales", key: "discount" }]) {
    namespace
    key
    value
  }
  compareAtPriceRange {
    minVariantPrice { ...money }
    maxVariantPrice { ...money }
  }
  priceRange {
    minVariantPrice { ...money }
    maxVariantPrice { ...money }
  }
  variants(first: 250) {
    edges {
      node {
        id
        title
        availableForSale
        image { ...image }
        metafields(
          identifiers: [
            { namespace: "color_variant", key: "color" }
            { namespace: "color_variant", key: "second_image" }
          ]
        ) {
          namespace
          key
          value
          reference {
            ... on MediaImage {
              image { ...image }
            }
          }
        }
        selectedOptions {
          name
          value
        }
        price { ...money }
        compareAtPrice { ...money }
      }
    }
  }
  featuredImage { ...image }
  images(first: 20) {
    edges {
      node { ...image }
    }
  }
}
"#;

/// Variables for [`COLLECTION_PRODUCTS_QUERY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQuery {
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl CollectionQuery {
    /// Query for `handle` in the collection's own sort order.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            sort_key: None,
            reverse: None,
        }
    }

    /// Sorts by `sort_key`. Product-level `CREATED_AT` maps to the
    /// collection-level `CREATED`.
    #[must_use]
    pub fn sorted_by(mut self, sort_key: &str, reverse: bool) -> Self {
        let key = if sort_key == "CREATED_AT" {
            "CREATED"
        } else {
            sort_key
        };
        self.sort_key = Some(key.to_string());
        self.reverse = Some(reverse);
        self
    }

    /// Sets the sort direction alone, leaving the sort key untouched.
    #[must_use]
    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }
}

/// JSON body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: &'a V,
}
