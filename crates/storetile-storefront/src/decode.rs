//! Serde helpers that turn the GraphQL payload's nullable lists and
//! connections into plain vectors.

use serde::{Deserialize, Deserializer};

/// Decodes a nullable list, dropping `null` elements. A `null` list decodes
/// as empty.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// Decodes a nullable list, keeping `null` elements in place so positions
/// match the request order. A `null` list decodes as empty.
pub(crate) fn positional<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes `{ "edges": [{ "node": T }] }` into `Vec<T>`.
///
/// A bare array of nodes is accepted too, so payloads that were already
/// reshaped (fixtures, cached exports) decode the same way.
pub(crate) fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let list = Option::<NodeList<T>>::deserialize(deserializer)?;
    Ok(match list {
        None => Vec::new(),
        Some(NodeList::Connection(connection)) => connection
            .edges
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .collect(),
        Some(NodeList::Plain(items)) => items.into_iter().flatten().collect(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeList<T> {
    Connection(Connection<T>),
    Plain(Vec<Option<T>>),
}

#[derive(Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Option<Edge<T>>>,
}

#[derive(Deserialize)]
struct Edge<T> {
    node: Option<T>,
}
