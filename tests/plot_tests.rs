use std::cell::RefCell;
use std::rc::Rc;

use plotcalc::Session;
use plotcalc::render::Renderer;
use plotcalc::series::Series;

#[derive(Default)]
struct Recorded {
  title: String,
  x_label: String,
  y_label: String,
  xs: Vec<f64>,
  ys: Vec<f64>,
  calls: usize,
}

struct RecordingRenderer {
  recorded: Rc<RefCell<Recorded>>,
}

impl Renderer for RecordingRenderer {
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &Series<f64>,
    ys: &Series<f64>,
  ) {
    let mut rec = self.recorded.borrow_mut();
    rec.calls += 1;
    rec.title = title.to_string();
    rec.x_label = x_label.to_string();
    rec.y_label = y_label.to_string();
    rec.xs = xs.iter().copied().collect();
    rec.ys = ys.iter().copied().collect();
  }
}

fn recording_session() -> (Session, Rc<RefCell<Recorded>>) {
  let recorded = Rc::new(RefCell::new(Recorded::default()));
  let session = Session::with_renderer(Box::new(RecordingRenderer {
    recorded: Rc::clone(&recorded),
  }));
  (session, recorded)
}

fn assert_close(actual: &[f64], expected: &[f64]) {
  assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
  for (a, e) in actual.iter().zip(expected) {
    assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
  }
}

#[test]
fn sweeps_the_range_inclusively() {
  let (mut session, recorded) = recording_session();
  assert_eq!(session.run("plot(3*x, x, 2, 5, 0.5)").unwrap(), "1");

  let rec = recorded.borrow();
  assert_eq!(rec.calls, 1);
  assert_close(&rec.xs, &[2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0]);
  assert_close(&rec.ys, &[6.0, 7.5, 9.0, 10.5, 12.0, 13.5, 15.0]);
  assert_eq!(rec.title, "3*x");
  assert_eq!(rec.x_label, "x");
}

#[test]
fn bounds_and_step_may_be_expressions() {
  let (mut session, recorded) = recording_session();
  session.run("a := 2").unwrap();
  session.run("plot(x + a, x, a, a + 2, 1)").unwrap();

  let rec = recorded.borrow();
  assert_close(&rec.xs, &[2.0, 3.0, 4.0]);
  assert_close(&rec.ys, &[4.0, 5.0, 6.0]);
  // The simplified target has the binding substituted in.
  assert_eq!(rec.title, "x + 2");
}

#[test]
fn loop_variable_must_be_unbound() {
  let (mut session, recorded) = recording_session();
  session.run("x := 1").unwrap();
  assert_eq!(
    session.run("plot(3*x, x, 2, 5, 0.5)").unwrap_err().to_string(),
    "Evaluation error: Variable already defined: x"
  );
  // Rejected before any evaluation or sampling happened.
  assert_eq!(recorded.borrow().calls, 0);
}

#[test]
fn inverted_range_is_rejected() {
  let (mut session, recorded) = recording_session();
  assert_eq!(
    session.run("plot(x, x, 5, 2, 0.5)").unwrap_err().to_string(),
    "Evaluation error: Plot range is inverted: min 5 is not below max 2"
  );
  assert_eq!(recorded.borrow().calls, 0);
}

#[test]
fn non_positive_step_is_rejected() {
  let (mut session, recorded) = recording_session();
  assert_eq!(
    session.run("plot(x, x, 0, 1, 0)").unwrap_err().to_string(),
    "Evaluation error: Plot step must be positive, got 0"
  );
  assert_eq!(
    session.run("plot(x, x, 0, 1, -1)").unwrap_err().to_string(),
    "Evaluation error: Plot step must be positive, got -1"
  );
  assert_eq!(recorded.borrow().calls, 0);
}

#[test]
fn wrong_arity_is_rejected() {
  let (mut session, _recorded) = recording_session();
  assert_eq!(
    session.run("plot(x, x, 0, 1)").unwrap_err().to_string(),
    "Evaluation error: plot expects 5 argument(s), got 4"
  );
}

#[test]
fn plot_is_unknown_inside_evaluation() {
  let (mut session, recorded) = recording_session();
  assert_eq!(
    session
      .run("toDouble(plot(x, x, 0, 1, 1))")
      .unwrap_err()
      .to_string(),
    "Evaluation error: Unknown operation: plot"
  );
  assert_eq!(recorded.borrow().calls, 0);
}

#[test]
fn loop_variable_shadow_is_discarded_after_the_call() {
  let (mut session, _recorded) = recording_session();
  session.run("plot(3*x, x, 2, 5, 0.5)").unwrap();
  // x was only bound inside the sweep.
  assert_eq!(
    session.run("toDouble(x)").unwrap_err().to_string(),
    "Evaluation error: Undefined variable: x"
  );
}

#[test]
fn svg_renderer_produces_a_plot() {
  let mut session = Session::new();
  session.run("plot(x*x, x, -2, 2, 0.25)").unwrap();
  let svg = session.take_svg().expect("plot should render");
  assert!(svg.contains("<svg"), "not an SVG: {}", &svg[..100.min(svg.len())]);
  assert!(svg.contains("circle"), "no markers in SVG");
  assert!(session.take_warning().is_none());
}
