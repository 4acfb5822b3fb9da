/// Builds a [`Router`](crate::Router) from a list of routes.
///
/// ```
/// use nuclear_routes::routes;
///
/// let router = routes! {
///     GET "/" => 0,
///     ANY "/ping" => 1,
///     @ "/user/:id" => {
///         GET "/profile" => 2,
///         POST "/post" => 3,
///     },
/// };
/// assert_eq!(router.len(), 6);
/// ```
///
/// Panics on an invalid pattern, like [`Router::insert`](crate::Router::insert).
#[macro_export]
macro_rules! routes {
    (@entries $router:ident, $parent:expr; ) => {};

    (@entries $router:ident, $parent:expr; @ $prefix:expr => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        let __bridge = $router.insert_bridge($parent, $prefix);
        $crate::routes!(@entries $router, __bridge; $($inner)*);
        $crate::routes!(@entries $router, $parent; $($($rest)*)?);
    };

    (@entries $router:ident, $parent:expr; ANY $pattern:expr => $data:expr $(, $($rest:tt)*)?) => {
        $router.any($parent, $pattern, $data);
        $crate::routes!(@entries $router, $parent; $($($rest)*)?);
    };

    (@entries $router:ident, $parent:expr; $method:ident $pattern:expr => $data:expr $(, $($rest:tt)*)?) => {
        $router.insert($parent, &[$crate::Method::$method], $pattern, $data);
        $crate::routes!(@entries $router, $parent; $($($rest)*)?);
    };

    {$($body:tt)*} => {{
        let mut __router = $crate::Router::new();
        let __root = __router.root();
        $crate::routes!(@entries __router, __root; $($body)*);
        __router
    }};
}
