// Joins the state boundaries with the winners of each round.

use crate::geo::*;

/// Annotates a GeoJSON FeatureCollection with the result of each state.
///
/// Every feature identified by a `SIGLA` property gets, for each round, the
/// leading candidate (`leader_round_N`, null without data) and the fill color
/// (`fill_round_N`). The legend of the reference candidates is added as a
/// `legend` member of the collection.
pub fn choropleth_layer(
    boundaries: &JSValue,
    index: &ElectionIndex,
    references: &[ReferenceCandidate],
) -> GeoResult<JSValue> {
    let mut layer = boundaries.clone();
    let features = match layer.get_mut("features").and_then(|f| f.as_array_mut()) {
        Some(f) => f,
        None => whatever!("The boundaries are not a GeoJSON FeatureCollection"),
    };

    let mut num_matched = 0;
    for feature in features.iter_mut() {
        let state: Option<StateCode> = feature
            .get("properties")
            .and_then(|p| p.get("SIGLA"))
            .and_then(|s| s.as_str())
            .and_then(|s| StateCode::new(s).ok());
        if state.is_none() {
            warn!("choropleth_layer: feature without a valid SIGLA property");
        }

        let mut annotations: Vec<(String, JSValue)> = Vec::new();
        for round in Round::ALL {
            let agg = state.as_ref().and_then(|s| index.state(s, round));
            let (leader, fill) = match agg {
                Some(a) => (
                    json!(a.leading_candidate),
                    candidate_color(&a.leading_candidate),
                ),
                None => (JSValue::Null, NO_DATA_COLOR),
            };
            annotations.push((format!("leader_round_{}", round.number()), leader));
            annotations.push((format!("fill_round_{}", round.number()), json!(fill)));
        }
        if state.as_ref().map_or(false, |s| index.states.contains_key(s)) {
            num_matched += 1;
        }

        let props = match feature.as_object_mut() {
            Some(obj) => obj
                .entry("properties")
                .or_insert_with(|| JSValue::Object(JSMap::new())),
            None => whatever!("A feature of the boundaries is not an object"),
        };
        // GeoJSON allows null properties.
        if !props.is_object() {
            *props = JSValue::Object(JSMap::new());
        }
        if let Some(props) = props.as_object_mut() {
            for (k, v) in annotations {
                props.insert(k, v);
            }
        }
    }
    info!(
        "choropleth_layer: {} of {} features with data",
        num_matched,
        features.len()
    );

    let legend: Vec<JSValue> = references
        .iter()
        .map(|rc| json!({"label": rc.label, "color": candidate_color(&rc.marker)}))
        .collect();
    if let Some(obj) = layer.as_object_mut() {
        obj.insert("legend".to_string(), JSValue::Array(legend));
    }
    Ok(layer)
}
