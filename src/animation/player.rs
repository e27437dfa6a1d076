use serde_json::json;

use crate::{
    animation::union::FrameUnionBuilder,
    foundation::error::{GraphreelError, GraphreelResult},
    graph::model::Graph,
    graph::renderable::RenderableGraph,
    render::draw::Rendered,
    render::frame::{FrameData, render_frame},
    render::trace::{Button, CurrentValue, Figure, Frame, Layout, Slider, UpdateMenu},
    style::theme::Theme,
};

/// Horizontal scale of the animated figure relative to the canvas.
const PLAYER_SCALE: f64 = 1.05;
/// Pixels reserved right of the canvas for the transport controls.
const PLAYER_WIDTH_INSET: f64 = 72.0;
/// Pixels reserved below the canvas for the transport controls.
const PLAYER_HEIGHT_INSET: f64 = 76.0;

/// Records graph snapshots and plays them back as an animated figure.
///
/// ```
/// use graphreel::{Animation, Graph};
///
/// let mut g = Graph::undirected();
/// g.set_node_attr("a", "pos", serde_json::json!([0.2, 0.5]));
///
/// let mut anim = Animation::new();
/// anim.rec(&g);
/// g.set_node_attr("a", "pos", serde_json::json!([0.8, 0.5]));
/// anim.rec(&g);
///
/// let out = anim.play().unwrap();
/// assert_eq!(out.figure.frames.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Animation {
    width: Option<u32>,
    height: Option<u32>,
    theme: Theme,
    recs: Vec<Graph>,
}

impl Animation {
    /// Empty animation using the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty animation with a fixed canvas size; `None` derives it from the snapshots.
    pub fn with_size(width: Option<u32>, height: Option<u32>) -> GraphreelResult<Self> {
        if width == Some(0) {
            return Err(GraphreelError::invalid_range(
                "animation width must be positive",
            ));
        }
        if height == Some(0) {
            return Err(GraphreelError::invalid_range(
                "animation height must be positive",
            ));
        }
        Ok(Self {
            width,
            height,
            ..Self::default()
        })
    }

    /// Replace the style defaults.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Record a copy of `graph`.
    pub fn rec(&mut self, graph: &Graph) {
        self.recs.push(graph.clone());
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.recs.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.recs.is_empty()
    }

    /// Build one frame per snapshot plus play/pause controls and a frame slider.
    ///
    /// Fails with [`GraphreelError::Structural`] with fewer than two snapshots or when the frames
    /// do not line up trace by trace.
    #[tracing::instrument(skip(self), fields(recs = self.recs.len()))]
    pub fn play(self) -> GraphreelResult<Rendered> {
        let Self {
            width,
            height,
            theme,
            recs,
        } = self;
        let (earlier, last) = match recs.as_slice() {
            [earlier @ .., last] if !earlier.is_empty() => (earlier, last),
            _ => {
                return Err(GraphreelError::structural(
                    "animation must have at least two recs",
                ));
            }
        };

        let (width, height) = canvas_size(earlier, last, width, height, &theme)?;

        let mut union = FrameUnionBuilder::new(&recs).build()?;
        let mut rendered: Vec<FrameData> = Vec::with_capacity(recs.len());
        for (i, g) in recs.iter().enumerate() {
            let frame = match &mut union {
                None => render_frame(g, g, width, height, &theme)?,
                Some(h) => {
                    if let Some(next) = recs.get(i + 1) {
                        FrameUnionBuilder::fold(h, next);
                    }
                    render_frame(g, h, width, height, &theme)?
                }
            };
            rendered.push(frame);
        }
        check_cardinality(&rendered)?;

        let mut warnings = Vec::new();
        let mut frames = Vec::with_capacity(rendered.len());
        for (name, frame) in rendered.into_iter().enumerate() {
            warnings.extend(frame.warnings);
            frames.push(Frame {
                name,
                data: frame.traces,
            });
        }
        let steps = (0..frames.len())
            .map(|i| Button {
                args: json!([[i], {"frame": {"redraw": false}, "mode": "immediate"}]),
                label: String::new(),
                method: "animate".to_string(),
            })
            .collect();

        let mut layout = Layout::new(
            PLAYER_SCALE * f64::from(width) + PLAYER_WIDTH_INSET,
            f64::from(height) + PLAYER_HEIGHT_INSET,
        );
        layout.updatemenus = Some(vec![transport()]);
        layout.sliders = Some(vec![Slider {
            currentvalue: CurrentValue { visible: false },
            steps,
        }]);

        let data = frames.first().map(|f| f.data.clone()).unwrap_or_default();
        Ok(Rendered {
            figure: Figure {
                data,
                layout,
                frames,
            },
            warnings,
        })
    }
}

/// Shared unpadded canvas size: the explicit value, else the last snapshot's when every
/// snapshot agrees with it, else the theme default.
fn canvas_size(
    earlier: &[Graph],
    last: &Graph,
    width: Option<u32>,
    height: Option<u32>,
    theme: &Theme,
) -> GraphreelResult<(u32, u32)> {
    let last = RenderableGraph::new(last, theme);
    let (last_width, last_height) = (last.canvas_width()?, last.canvas_height()?);

    let (mut width, mut height) = (width, height);
    for g in earlier {
        let g = RenderableGraph::new(g, theme);
        if width.is_none() && g.canvas_width()? != last_width {
            tracing::debug!("snapshot widths differ, using the theme width");
            width = Some(theme.graph_width);
        }
        if height.is_none() && g.canvas_height()? != last_height {
            tracing::debug!("snapshot heights differ, using the theme height");
            height = Some(theme.graph_height);
        }
    }
    Ok((width.unwrap_or(last_width), height.unwrap_or(last_height)))
}

fn check_cardinality(frames: &[FrameData]) -> GraphreelResult<()> {
    let Some(first) = frames.first() else {
        return Ok(());
    };
    for (i, frame) in frames.iter().enumerate() {
        if frame.traces.len() != first.traces.len() || frame.node_traces != first.node_traces {
            return Err(GraphreelError::structural(format!(
                "frame {i} has {} traces ({} node traces), frame 0 has {} ({})",
                frame.traces.len(),
                frame.node_traces,
                first.traces.len(),
                first.node_traces
            )));
        }
    }
    Ok(())
}

fn transport() -> UpdateMenu {
    UpdateMenu {
        buttons: vec![
            Button {
                args: json!([null, {"frame": {"redraw": false}, "fromcurrent": true}]),
                label: "Play".to_string(),
                method: "animate".to_string(),
            },
            Button {
                args: json!([[null], {"frame": {"redraw": false}, "mode": "immediate"}]),
                label: "Pause".to_string(),
                method: "animate".to_string(),
            },
        ],
        showactive: true,
        kind: "buttons".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
