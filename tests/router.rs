use nuclear_routes::{
    routes, Captures, Config, Format, MatchError, Method, PatternOptions, RequestInfo, Route,
    Router, RouterError,
};

use http::header::{HeaderMap, HeaderValue};

fn find<'a>(
    router: &'a Router<usize>,
    method: &Method,
    path: &'a str,
) -> Option<(usize, Vec<(&'a str, &'a str)>)> {
    let m = router.find_path(method, path).ok()?;
    Some((*m.target()?, m.captures().to_vec()))
}

#[test]
fn router_common() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.nest(root, "/user/:user_id", |r, user| {
        r.get(user, "/post/:post_id", 1);
        r.get(user, "/profile", 2);
        r.get(user, "/file/*path", 3);
        r.get(user, "/", 4);
    });
    router.get(root, "/explore", 5);
    router.nest(root, "/pan", |r, pan| {
        r.get(pan, "/*path", 6);
    });

    let cases: &[(_, _, &[(&str, &str)])] = &[
        (
            "/user/asd/post/123",
            1,
            &[("user_id", "asd"), ("post_id", "123")],
        ),
        ("/user/asd/profile", 2, &[("user_id", "asd")]),
        (
            "/user/asd/file/home/asd/.bashrc",
            3,
            &[("user_id", "asd"), ("path", "home/asd/.bashrc")],
        ),
        ("/user/asd", 4, &[("user_id", "asd")]),
        ("/user/asd/", 4, &[("user_id", "asd")]),
        ("/explore", 5, &[]),
        ("/pan/home/asd", 6, &[("path", "home/asd")]),
    ];

    for &(url, data, captures) in cases.iter() {
        let ret = find(&router, &Method::GET, url).unwrap();
        assert_eq!(ret.0, data, "{}", url);
        assert_eq!(&*ret.1, captures, "{}", url);
    }

    assert!(find(&router, &Method::GET, "/explorer").is_none());
    assert!(find(&router, &Method::GET, "/pan").is_none());
}

#[test]
fn router_declaration_order() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/user/:id", 1);
    router.get(root, "/user/:id", 2);
    router.post(root, "/user/:id", 3);

    assert_eq!(find(&router, &Method::GET, "/user/7").unwrap().0, 1);
    assert_eq!(find(&router, &Method::POST, "/user/7").unwrap().0, 3);

    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.post(root, "/user/:id", 1);
    router.get(root, "/user/:id", 2);

    assert_eq!(find(&router, &Method::GET, "/user/7").unwrap().0, 2);
    assert_eq!(find(&router, &Method::POST, "/user/7").unwrap().0, 1);
}

#[test]
fn router_method_not_allowed() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/user/:id", 1);
    router.put(root, "/user/:id", 2);
    router.any(root, "/ping", 3);

    let err = router.find_path(&Method::DELETE, "/user/1").unwrap_err();
    assert_eq!(
        err,
        MatchError::MethodNotAllowed {
            allowed: vec![Method::GET, Method::PUT]
        }
    );

    let err = router.find_path(&Method::GET, "/nope").unwrap_err();
    assert_eq!(err, MatchError::NoMatch);

    assert_eq!(find(&router, &Method::DELETE, "/ping").unwrap().0, 3);
}

#[test]
fn router_head_as_get() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/user/:id", 1);
    assert_eq!(find(&router, &Method::HEAD, "/user/1").unwrap().0, 1);

    let config = Config {
        head_as_get: false,
        ..Config::default()
    };
    let mut router: Router<usize> = Router::with_config(config);
    let root = router.root();
    router.get(root, "/user/:id", 1);
    let err = router.find_path(&Method::HEAD, "/user/1").unwrap_err();
    assert_eq!(
        err,
        MatchError::MethodNotAllowed {
            allowed: vec![Method::GET]
        }
    );
}

#[test]
fn router_bridge_stack() {
    let mut router: Router<&str> = Router::new();
    let root = router.root();
    router.add_condition("is_admin", |_, req, _, _| req.header("x-admin").is_some());

    let admin = router.insert_bridge(root, "/admin");
    router.requires(admin, "is_admin", "").unwrap();
    router.set_target(admin, "admin");
    let users = router.get(admin, "/users", "users");

    let mut headers = HeaderMap::new();
    headers.insert("x-admin", HeaderValue::from_static("1"));
    let get = Method::GET;
    let req = RequestInfo::new(&get, "/admin/users").with_headers(&headers);

    let mut m = router.find(req).unwrap();
    assert_eq!(m.stack().len(), 2);
    assert_eq!(m.stack()[0].node(), admin);
    assert_eq!(m.stack()[1].node(), users);
    assert_eq!(m.endpoint(), users);
    assert_eq!(m.frame_target(&m.stack()[0]), Some(&"admin"));
    assert_eq!(m.target(), Some(&"users"));

    assert_eq!(m.position(), 0);
    assert_eq!(m.advance().map(|f| f.node()), Some(admin));
    assert_eq!(m.position(), 1);
    assert_eq!(m.advance().map(|f| f.node()), Some(users));
    assert!(m.is_finished());
    assert!(m.advance().is_none());
    m.rewind();
    assert_eq!(m.position(), 0);

    let err = router.find_path(&Method::GET, "/admin/users").unwrap_err();
    assert_eq!(err, MatchError::NoMatch);
}

#[test]
fn router_frame_captures() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let user = router.insert_bridge(root, "/user/:uid");
    router.get(user, "/post/:pid", 1);

    let m = router.find_path(&Method::GET, "/user/7/post/9").unwrap();
    let stack = m.stack();
    assert_eq!(m.frame_captures(&stack[0]), &[("uid", "7")]);
    assert_eq!(m.frame_captures(&stack[1]), &[("pid", "9")]);
    assert_eq!(m.captures_until(&stack[1]), &[("uid", "7"), ("pid", "9")]);
    assert_eq!(m.captures().parse::<u32>("pid"), Some(Ok(9)));
}

#[test]
fn router_group_is_not_a_frame() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let group = router
        .add_route(root, "/shop/:shop", &[], &PatternOptions::new())
        .unwrap();
    router.get(group, "/item/:item", 1);

    let m = router.find_path(&Method::GET, "/shop/a/item/b").unwrap();
    assert_eq!(m.stack().len(), 1);
    assert_eq!(m.frame_captures(&m.stack()[0]), &[("shop", "a"), ("item", "b")]);
    assert!(!router.route(group).is_endpoint());
    assert!(!router.route(group).is_bridge());
}

#[test]
fn router_backtracking() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.nest(root, "/a/:x", |r, a| {
        r.get(a, "/b", 1);
    });
    router.get(root, "/a/:y/c", 2);

    let (data, captures) = find(&router, &Method::GET, "/a/1/c").unwrap();
    assert_eq!(data, 2);
    assert_eq!(captures, vec![("y", "1")]);
}

#[test]
fn router_numeric_type() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/blog/:id|num", 1);

    let (data, captures) = find(&router, &Method::GET, "/blog/42").unwrap();
    assert_eq!(data, 1);
    assert_eq!(captures, vec![("id", "42")]);

    let err = router.find_path(&Method::GET, "/blog/abc").unwrap_err();
    assert_eq!(err, MatchError::NoMatch);
}

#[test]
fn router_custom_type() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.add_type("lang", &["en", "de"]);
    router.get(root, "/:lang|lang/about", 1);

    assert_eq!(find(&router, &Method::GET, "/de/about").unwrap().0, 1);
    assert!(find(&router, &Method::GET, "/fr/about").is_none());

    let err = router
        .try_insert(root, &[Method::GET], "/:id|uuid", 2)
        .unwrap_err();
    assert!(matches!(err, RouterError::Compile { .. }));
}

#[test]
fn router_wildcard_greediness() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/files/*path", 1);

    let (_, captures) = find(&router, &Method::GET, "/files/a/b/c.txt").unwrap();
    assert_eq!(captures, vec![("path", "a/b/c.txt")]);
}

#[test]
fn router_format() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/user/:id", 1);
    let api = router
        .add_route(
            root,
            "/api",
            &[Method::GET],
            &PatternOptions::new().format(Format::OneOf(vec!["json".into()])),
        )
        .unwrap();
    router.set_target(api, 2);

    let m = router.find_path(&Method::GET, "/user/42.json").unwrap();
    assert_eq!(m.get("id"), Some("42"));
    assert_eq!(m.format(), Some("json"));

    let get = Method::GET;
    let req = RequestInfo::new(&get, "/user/42").with_format("html");
    let m = router.find(req).unwrap();
    assert_eq!(m.format(), Some("html"));

    assert_eq!(find(&router, &Method::GET, "/api.json").unwrap().0, 2);
    assert!(find(&router, &Method::GET, "/api").is_none());
    assert!(find(&router, &Method::GET, "/api.xml").is_none());

    let config = Config {
        detect_format: false,
        ..Config::default()
    };
    let mut router: Router<usize> = Router::with_config(config);
    let root = router.root();
    router.get(root, "/user/:id", 1);
    assert!(find(&router, &Method::GET, "/user/42.json").is_none());
    assert_eq!(find(&router, &Method::GET, "/user/42").unwrap().0, 1);
}

#[test]
fn router_defaults() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let opts = PatternOptions::new().with_default("action", "show");
    let show = router.add_route(root, "/user/:id", &[], &opts).unwrap();
    router.set_target(show, 1);

    let opts = PatternOptions::new()
        .with_default("controller", "home")
        .with_default("action", "index");
    let fallback = router
        .add_route(root, "/:controller/:action", &[], &opts)
        .unwrap();
    router.set_target(fallback, 2);

    let (data, captures) = find(&router, &Method::GET, "/user/5").unwrap();
    assert_eq!(data, 1);
    assert_eq!(captures, vec![("action", "show"), ("id", "5")]);

    let cases: &[(&str, &str, &str)] = &[
        ("/", "home", "index"),
        ("/blog", "blog", "index"),
        ("/blog/list", "blog", "list"),
    ];
    for &(path, controller, action) in cases {
        let m = router.find_path(&Method::GET, path).unwrap();
        assert_eq!(m.target(), Some(&2), "{}", path);
        assert_eq!(m.get("controller"), Some(controller), "{}", path);
        assert_eq!(m.get("action"), Some(action), "{}", path);
    }
}

#[test]
fn router_conditions() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();

    let api = router.get(root, "/", 1);
    router.requires(api, "host", "*.example.com").unwrap();
    let ajax = router.get(root, "/", 2);
    router
        .requires(ajax, "header", "X-Requested-With: XMLHttpRequest")
        .unwrap();
    router.get(root, "/", 3);

    let get = Method::GET;
    let run = |headers: &HeaderMap| {
        let req = RequestInfo::new(&get, "/").with_headers(headers);
        router.find(req).ok().and_then(|m| m.target().copied())
    };

    let mut headers = HeaderMap::new();
    headers.insert("host", HeaderValue::from_static("API.example.com:8080"));
    assert_eq!(run(&headers), Some(1));

    let mut headers = HeaderMap::new();
    headers.insert("host", HeaderValue::from_static("example.com"));
    assert_eq!(run(&headers), Some(3));

    headers.insert(
        "x-requested-with",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    assert_eq!(run(&headers), Some(2));

    let err = router.requires(api, "is_weekend", "").unwrap_err();
    assert!(matches!(err, RouterError::UnknownCondition(ref n) if n == "is_weekend"));

    let conditions: Vec<_> = router.route(ajax).conditions().collect();
    assert_eq!(conditions, vec![("header", "X-Requested-With: XMLHttpRequest")]);
}

#[test]
fn router_conditions_before_methods() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let items = router.get(root, "/items", 1);
    router.requires(items, "host", "api.example.com").unwrap();

    let post = Method::POST;

    let mut other = HeaderMap::new();
    other.insert("host", HeaderValue::from_static("www.example.com"));
    let req = RequestInfo::new(&post, "/items").with_headers(&other);
    assert_eq!(router.find(req).unwrap_err(), MatchError::NoMatch);

    let mut api = HeaderMap::new();
    api.insert("host", HeaderValue::from_static("api.example.com"));
    let req = RequestInfo::new(&post, "/items").with_headers(&api);
    assert_eq!(
        router.find(req).unwrap_err(),
        MatchError::MethodNotAllowed {
            allowed: vec![Method::GET]
        }
    );
}

#[test]
fn router_host_ports() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let local6 = router.get(root, "/", 1);
    router.requires(local6, "host", "[::1]").unwrap();
    let local = router.get(root, "/", 2);
    router.requires(local, "host", "localhost").unwrap();

    let get = Method::GET;
    let run = |host: &'static str| {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static(host));
        let req = RequestInfo::new(&get, "/").with_headers(&headers);
        let target = router.find(req).ok().and_then(|m| m.target().copied());
        target
    };

    assert_eq!(run("[::1]"), Some(1));
    assert_eq!(run("[::1]:8080"), Some(1));
    assert_eq!(run("[::2]:8080"), None);
    assert_eq!(run("localhost:3000"), Some(2));
    assert_eq!(run("LocalHost"), Some(2));
}

#[test]
fn router_condition_sees_captures() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.add_condition(
        "even",
        |_: &Route, _: &RequestInfo<'_>, caps: &Captures<'_>, arg: &str| {
            caps.parse::<u64>(arg).and_then(Result::ok).map_or(false, |n| n % 2 == 0)
        },
    );
    let even = router.get(root, "/n/:n", 1);
    router.requires(even, "even", "n").unwrap();
    router.get(root, "/n/:n", 2);

    assert_eq!(find(&router, &Method::GET, "/n/4").unwrap().0, 1);
    assert_eq!(find(&router, &Method::GET, "/n/5").unwrap().0, 2);
}

#[test]
fn router_names() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let a = router.get(root, "/a", 1);
    let b = router.get(root, "/b", 2);

    router.name(a, "first").unwrap();
    router.name(a, "first").unwrap();
    let err = router.name(b, "first").unwrap_err();
    assert!(matches!(err, RouterError::DuplicateRouteName(ref n) if n == "first"));

    assert_eq!(router.route(a).name(), Some("first"));
    assert_eq!(router.route(b).name(), None);
    assert_eq!(router.route(b).default_name(), "b");
}

#[test]
fn router_shortcuts() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.add_shortcut("resource", |r, parent, arg| {
        let bridge = r.add_bridge(parent, &format!("/{}", arg), &[], &PatternOptions::new())?;
        r.try_insert(bridge, &[Method::GET], "/", 1)?;
        r.try_insert(bridge, &[Method::GET], "/:id", 2)?;
        Ok(bridge)
    });

    router.shortcut(root, "resource", "users").unwrap();

    assert_eq!(find(&router, &Method::GET, "/users").unwrap().0, 1);
    let (data, captures) = find(&router, &Method::GET, "/users/5").unwrap();
    assert_eq!(data, 2);
    assert_eq!(captures, vec![("id", "5")]);

    let err = router.shortcut(root, "nope", "").unwrap_err();
    assert!(matches!(err, RouterError::UnknownShortcut(_)));
}

#[test]
#[should_panic(expected = "wildcard placeholder")]
fn router_insert_panics() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    router.get(root, "/files/*path/raw", 1);
}

#[test]
fn router_try_nest() {
    let mut router: Router<usize> = Router::new();
    let root = router.root();
    let ret = router.try_nest(root, "/app", |r, app| {
        r.try_insert(app, &[], "/:a:b", 1)?;
        Ok(())
    });
    assert!(matches!(ret, Err(RouterError::Compile { .. })));
}

#[test]
fn router_macro() {
    let router = routes! {
        GET "/" => 0,
        POST "/user" => 1,
        ANY "/ping" => 2,
        @ "/user/:id" => {
            GET "/profile" => 3,
            @ "/post/:post_id" => {
                DELETE "/" => 4,
            },
        },
    };

    assert_eq!(find(&router, &Method::GET, "/").unwrap().0, 0);
    assert_eq!(find(&router, &Method::POST, "/user").unwrap().0, 1);
    assert_eq!(find(&router, &Method::PATCH, "/ping").unwrap().0, 2);
    assert_eq!(find(&router, &Method::GET, "/user/5/profile").unwrap().0, 3);

    let m = router.find_path(&Method::DELETE, "/user/5/post/6").unwrap();
    assert_eq!(m.target(), Some(&4));
    assert_eq!(m.stack().len(), 3);
    assert_eq!(m.get("id"), Some("5"));
    assert_eq!(m.get("post_id"), Some("6"));
}
