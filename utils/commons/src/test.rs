use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
pub use inner::*;

#[concordium_cfg_test]
mod inner {
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;

    pub fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(return_value.clone())))
        })
    }

    pub fn parse_and_map_mock<D: Deserial, T: Serial, S>(
        f: impl Fn(&D) -> Option<T> + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            f(&value)
                .map(|r| (false, Some(r)))
                .ok_or(CallContractError::Trap)
        })
    }

    /// Like [`parse_and_check_mock`], but the check also sees the calling
    /// contract's state as it is at the time of the call.
    pub fn parse_and_inspect_mock<D: Deserial, S>(
        inspect: impl Fn(&D, &S) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, state: &mut S| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !inspect(&value, state) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Parses the parameter and answers without a return value.
    pub fn parse_and_empty_mock<D: Deserial + 'static, S>() -> MockFn<S> {
        MockFn::new(|parameter, _, _, _state| -> CallContractResult<()> {
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            Ok((false, None))
        })
    }

    /// Parses the parameter, then rejects the call regardless.
    pub fn parse_and_reject_mock<D: Deserial + 'static, S>() -> MockFn<S> {
        parse_and_check_mock(|_: &D| false, ())
    }
}
