/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Internal macro used for try return on control flow.
macro_rules! try_cf {
    ($e:expr) => {
        match $e {
            x => {
                if x.should_break() {
                    return x;
                }
            }
        }
    };
}

/// Used by [polygon_path] to count repetitions for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a closed straight edged [Path](crate::path::Path) from a list of `(x, y)` tuples.
///
/// The path uses the nonzero winding rule.
///
/// # Examples
///
/// ```
/// # use bezier_area::polygon_path;
/// # use bezier_area::path::*;
/// # use bezier_area::core::math::*;
/// let triangle = polygon_path![(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)];
/// assert_eq!(triangle.len(), 4);
/// assert_eq!(triangle[0], PathCmd::MoveTo(vec2(0.0, 0.0)));
/// assert_eq!(triangle[3], PathCmd::Close);
/// ```
#[macro_export]
macro_rules! polygon_path {
    ($first:expr $(, $x:expr )* $(,)?) => {
        {
            use $crate::path::*;
            let size = 2 + <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut path = Path::with_capacity(size, WindingRule::NonZero);
            path.move_to($first.0, $first.1);
            $(
                path.line_to($x.0, $x.1);
            )*
            path.close();
            path
        }
    };
}
