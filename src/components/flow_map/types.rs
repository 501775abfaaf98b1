//! Scene snapshot: entities, flows between them, and derived-on-read totals.

/// Category of a monetary flow, selecting its color treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
	Synergy,
	Investment,
	Supply,
	Flow,
}

impl FlowKind {
	/// Gradient color pair stroked along the link curve.
	pub fn gradient(self) -> (&'static str, &'static str) {
		match self {
			FlowKind::Synergy => ("#ffd166", "#ff9f1c"),
			FlowKind::Investment => ("#06d6a0", "#1b9aaa"),
			FlowKind::Supply => ("#64b4ff", "#4361ee"),
			FlowKind::Flow => ("#b8b8d1", "#9d8df1"),
		}
	}

	/// Color of the flow particles riding the curve.
	pub fn particle_color(self) -> &'static str {
		match self {
			FlowKind::Synergy => "#ffd166",
			FlowKind::Investment => "#06d6a0",
			FlowKind::Supply => "#64b4ff",
			FlowKind::Flow => "#b8b8d1",
		}
	}

	/// Human-readable legend label.
	pub fn label(self) -> &'static str {
		match self {
			FlowKind::Synergy => "Synergy",
			FlowKind::Investment => "Investment",
			FlowKind::Supply => "Supply",
			FlowKind::Flow => "Flow",
		}
	}
}

/// An entity pinned to a geographic position, sized by monetary value.
#[derive(Clone, Debug)]
pub struct FlowNode {
	pub id: String,
	pub name: String,
	pub role: String,
	pub lat: f64,
	pub lon: f64,
	pub value: f64,
	pub color: String,
}

/// A directed, weighted flow between two entities, referenced by id.
#[derive(Clone, Debug)]
pub struct FlowLink {
	pub source: String,
	pub target: String,
	pub value: f64,
	pub kind: FlowKind,
}

/// One immutable snapshot of the graph. Replaced wholesale, never edited.
#[derive(Clone, Debug, Default)]
pub struct MapData {
	pub nodes: Vec<FlowNode>,
	pub links: Vec<FlowLink>,
}

impl MapData {
	pub fn node(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Resolve a link's endpoints. A dangling reference yields `None` and the
	/// link is simply skipped; the rest of the scene is unaffected.
	pub fn resolve(&self, link: &FlowLink) -> Option<(&FlowNode, &FlowNode)> {
		Some((self.node(&link.source)?, self.node(&link.target)?))
	}

	pub fn total_value(&self) -> f64 {
		self.nodes.iter().map(|n| n.value).sum()
	}

	pub fn total_synergy(&self) -> f64 {
		self.links
			.iter()
			.filter(|l| l.kind == FlowKind::Synergy)
			.map(|l| l.value)
			.sum()
	}

	/// Number of links touching `id` in either direction.
	pub fn connection_count(&self, id: &str) -> usize {
		self.links
			.iter()
			.filter(|l| l.source == id || l.target == id)
			.count()
	}

	/// Sum of synergy-kind flow through `id` in either direction.
	pub fn synergy_flow(&self, id: &str) -> f64 {
		self.links
			.iter()
			.filter(|l| l.kind == FlowKind::Synergy && (l.source == id || l.target == id))
			.map(|l| l.value)
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, value: f64) -> FlowNode {
		FlowNode {
			id: id.into(),
			name: id.into(),
			role: "test".into(),
			lat: 0.0,
			lon: 0.0,
			value,
			color: "#ffffff".into(),
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

	fn sample() -> MapData {
		MapData {
			nodes: vec![node("a", 100.0), node("b", 400.0), node("c", 50.0)],
			links: vec![
				link("a", "b", 10_000.0, FlowKind::Synergy),
				link("b", "c", 2_000.0, FlowKind::Supply),
				link("c", "a", 3_000.0, FlowKind::Synergy),
				link("a", "ghost", 9_999.0, FlowKind::Investment),
			],
		}
	}

	#[test]
	fn dangling_link_resolves_to_none() {
		let data = sample();
		assert!(data.resolve(&data.links[3]).is_none());
		assert!(data.resolve(&data.links[0]).is_some());
	}

	#[test]
	fn totals_scan_the_snapshot() {
		let data = sample();
		assert_eq!(data.total_value(), 550.0);
		assert_eq!(data.total_synergy(), 13_000.0);
	}

	#[test]
	fn per_node_aggregates_count_both_directions() {
		let data = sample();
		assert_eq!(data.connection_count("a"), 3);
		assert_eq!(data.connection_count("b"), 2);
		assert_eq!(data.synergy_flow("a"), 13_000.0);
		assert_eq!(data.synergy_flow("b"), 10_000.0);
	}
}
