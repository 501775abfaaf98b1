use leptos::prelude::*;

use crate::components::flow_map::{
	FlowKind, FlowLink, FlowMapCanvas, FlowNode, MapData, format_amount,
};

fn node(
	id: &str,
	name: &str,
	role: &str,
	lat: f64,
	lon: f64,
	value: f64,
	color: &str,
) -> FlowNode {
	FlowNode {
		id: id.into(),
		name: name.into(),
		role: role.into(),
		lat,
		lon,
		value,
		color: color.into(),
	}
}

fn link(source: &str, target: &str, value: f64, kind: FlowKind) -> FlowLink {
	FlowLink {
		source: source.into(),
		target: target.into(),
		value,
		kind,
	}
}

/// In-memory stand-in for the external feed: one deterministic snapshot of
/// entities and the money flowing between them.
fn sample_snapshot() -> MapData {
	MapData {
		nodes: vec![
			node("seoul", "Seoul", "Headquarters", 37.57, 126.98, 840_000_000.0, "#ffd166"),
			node("tokyo", "Tokyo", "Manufacturing", 35.68, 139.69, 520_000_000.0, "#06d6a0"),
			node("singapore", "Singapore", "Logistics Hub", 1.35, 103.82, 310_000_000.0, "#64b4ff"),
			node("berlin", "Berlin", "R&D Lab", 52.52, 13.40, 180_000_000.0, "#9d8df1"),
			node("newyork", "New York", "Lead Investor", 40.71, -74.01, 960_000_000.0, "#ff9f1c"),
			node("saopaulo", "Sao Paulo", "Raw Supplier", -23.55, -46.63, 120_000_000.0, "#ef476f"),
			node("sydney", "Sydney", "Distributor", -33.87, 151.21, 90_000_000.0, "#1b9aaa"),
			node("london", "London", "Finance Desk", 51.51, -0.13, 440_000_000.0, "#b8b8d1"),
		],
		links: vec![
			link("newyork", "seoul", 350_000_000.0, FlowKind::Investment),
			link("london", "seoul", 190_000_000.0, FlowKind::Investment),
			link("seoul", "tokyo", 240_000_000.0, FlowKind::Synergy),
			link("seoul", "berlin", 110_000_000.0, FlowKind::Synergy),
			link("berlin", "london", 70_000_000.0, FlowKind::Synergy),
			link("tokyo", "singapore", 160_000_000.0, FlowKind::Supply),
			link("saopaulo", "tokyo", 80_000_000.0, FlowKind::Supply),
			link("singapore", "sydney", 60_000_000.0, FlowKind::Flow),
			link("seoul", "singapore", 90_000_000.0, FlowKind::Flow),
		],
	}
}

const LEGEND_KINDS: [FlowKind; 4] = [
	FlowKind::Synergy,
	FlowKind::Investment,
	FlowKind::Supply,
	FlowKind::Flow,
];

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_snapshot);
	let selected = RwSignal::new(None::<String>);

	let selected_panel = move || {
		let id = selected.get()?;
		let data = graph_data.get();
		let node = data.node(&id)?;
		let (name, role, value) = (node.name.clone(), node.role.clone(), node.value);
		let (connections, synergy) = (data.connection_count(&id), data.synergy_flow(&id));
		Some(view! {
			<div class="detail-panel">
				<h2>{name}</h2>
				<p class="role">{role}</p>
				<dl>
					<dt>"Value"</dt>
					<dd>{format_amount(value)}</dd>
					<dt>"Connections"</dt>
					<dd>{connections}</dd>
					<dt>"Synergy flow"</dt>
					<dd>{format_amount(synergy)}</dd>
				</dl>
			</div>
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="flow-map-page">
				<FlowMapCanvas data=graph_data selected=selected />
				<div class="map-overlay">
					<h1>"Money Flow Map"</h1>
					<p class="subtitle">
						"Hover a node for detail. Click to select. Drag to pan, scroll to zoom."
					</p>
					<ul class="legend">
						{LEGEND_KINDS
							.iter()
							.map(|kind| {
								let swatch = format!(
									"display: inline-block; width: 0.8em; height: 0.8em; background-color: {};",
									kind.particle_color(),
								);
								view! {
									<li>
										<span style=swatch></span>
										" "
										{kind.label()}
									</li>
								}
							})
							.collect_view()}
					</ul>
					<p class="totals">
						{move || {
							let data = graph_data.get();
							format!(
								"Total value {} · Synergy {}",
								format_amount(data.total_value()),
								format_amount(data.total_synergy()),
							)
						}}
					</p>
					{selected_panel}
				</div>
			</div>
		</ErrorBoundary>
	}
}
